// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod client;
mod config;
mod coordinator;
pub mod memory;
mod metadata;

pub use client::MetadataClient;
pub use config::MetadataConfig;
pub use coordinator::{RollbackAction, WriteCoordinator};
pub use metadata::Metadata;
