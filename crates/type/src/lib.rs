// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod column;
pub mod decimal;
pub mod error;
pub mod table;
pub mod temporal;
mod r#type;
pub mod value;

pub use column::ColumnHandle;
pub use error::{DriverError, Error, ErrorKind};
pub use table::TableName;
pub use temporal::SessionZone;
pub use r#type::{Lane, MAX_PRECISION, MAX_SHORT_PRECISION, Type};
pub use value::{DriverValue, ValueShape};

pub type Result<T> = std::result::Result<T, Error>;
