// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! The row-cursor driver the adapter reads through.
//!
//! A driver plans a scan into fragments and opens a forward-only cursor over
//! one fragment. Values are read field by field from the current row; like
//! most row-cursor protocols, nullness is a side effect of the last read.

use conduit_split::{Predicate, ScanFragment};
use conduit_type::{ColumnHandle, DriverError, DriverValue, TableName};

pub trait Driver: Send + Sync {
	type Cursor: DriverCursor;

	/// The fragments a scan of `table` filtered by `predicate` is made of.
	fn fragments(
		&self,
		table: &TableName,
		predicate: &Predicate,
		columns: &[ColumnHandle],
	) -> Result<Vec<ScanFragment>, DriverError>;

	/// Open a cursor over exactly one fragment, projecting `columns` in order.
	fn open(
		&self,
		table: &TableName,
		fragment: &ScanFragment,
		columns: &[ColumnHandle],
	) -> Result<Self::Cursor, DriverError>;
}

pub trait DriverCursor {
	/// Move to the next row. `false` once the fragment is exhausted.
	fn next(&mut self) -> Result<bool, DriverError>;

	/// Read field `field` of the current row.
	fn value(&mut self, field: usize) -> Result<DriverValue, DriverError>;

	/// Whether the value read last was null.
	fn was_null(&self) -> Result<bool, DriverError>;

	/// Bytes the current row occupied on the wire.
	fn row_size(&self) -> u64;

	fn close(&mut self) -> Result<(), DriverError>;
}
