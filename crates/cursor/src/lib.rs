// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod batch;
mod config;
pub mod driver;
pub mod memory;
mod plan;
mod row;
mod source;

pub use batch::{BatchCursor, open_batch_cursor};
pub use config::CursorConfig;
pub use driver::{Driver, DriverCursor};
pub use plan::plan_splits;
pub use row::{RowCursor, open_row_cursor};
