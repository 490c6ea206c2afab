// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod address;
mod fragment;
pub mod predicate;
mod split;

pub use address::HostAddress;
pub use fragment::{KeyRange, ScanFragment};
pub use predicate::{Bound, ColumnDomain, Domain, Literal, Predicate, Range};
pub use split::SplitDescriptor;
