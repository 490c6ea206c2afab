// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod cell;
pub mod coerce;
mod data;
mod page;

pub use cell::Cell;
pub use coerce::convert;
pub use data::ColumnData;
pub use page::{Column, Page, PageBuilder};
