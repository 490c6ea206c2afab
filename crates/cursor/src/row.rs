// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use conduit_column::Cell;
use conduit_split::SplitDescriptor;
use conduit_type::{ColumnHandle, Error, Result, Type};

use crate::{CursorConfig, Driver, DriverCursor, source::ScanSource};

/// Open a row-at-a-time cursor over one split.
pub fn open_row_cursor<D: Driver>(
	driver: &D,
	split: &SplitDescriptor,
	columns: &[ColumnHandle],
	config: &CursorConfig,
) -> Result<RowCursor<D::Cursor>> {
	let source = crate::source::open_source(driver, split, columns, config.zone)?;
	Ok(RowCursor {
		source,
	})
}

/// Field accessors over the current row.
///
/// Values go through the same coercion as pages. A null field reads as the
/// lane default (`false`, `0`, `0.0`, empty); use [`RowCursor::is_null`] to
/// tell the two apart.
pub struct RowCursor<C: DriverCursor> {
	source: ScanSource<C>,
}

impl<C: DriverCursor> RowCursor<C> {
	pub fn columns(&self) -> &[ColumnHandle] {
		self.source.columns()
	}

	/// Type of `field`; like every accessor it fails once the cursor is
	/// closed.
	pub fn column_type(&self, field: usize) -> Result<&Type> {
		self.source.ensure_open()?;
		self.source.column_type(field)
	}

	/// Move to the next row; `false` once exhausted, after which the cursor
	/// is closed.
	pub fn advance(&mut self) -> Result<bool> {
		self.source.advance()
	}

	pub fn get_boolean(&mut self, field: usize) -> Result<bool> {
		match self.source.cell(field)? {
			Cell::Boolean(value) => Ok(value),
			Cell::Null => Ok(false),
			cell => Err(self.mismatch(cell, field)),
		}
	}

	pub fn get_long(&mut self, field: usize) -> Result<i64> {
		match self.source.cell(field)? {
			Cell::Long(value) => Ok(value),
			Cell::Null => Ok(0),
			cell => Err(self.mismatch(cell, field)),
		}
	}

	pub fn get_double(&mut self, field: usize) -> Result<f64> {
		match self.source.cell(field)? {
			Cell::Double(value) => Ok(value),
			Cell::Null => Ok(0.0),
			cell => Err(self.mismatch(cell, field)),
		}
	}

	pub fn get_slice(&mut self, field: usize) -> Result<Vec<u8>> {
		match self.source.cell(field)? {
			Cell::Slice(value) => Ok(value),
			Cell::Null => Ok(Vec::new()),
			cell => Err(self.mismatch(cell, field)),
		}
	}

	/// Elements of an array field, `None` when the field is null or the
	/// driver handed out something other than an array.
	pub fn get_object(&mut self, field: usize) -> Result<Option<Vec<Cell>>> {
		let r#type = self.column_type(field)?;
		if !r#type.is_array() {
			return Err(Error::NotAnArray {
				field,
				actual: r#type.clone(),
			});
		}
		match self.source.cell(field)? {
			Cell::Block(elements) => Ok(Some(elements)),
			Cell::Null => Ok(None),
			cell => Err(self.mismatch(cell, field)),
		}
	}

	/// Nullness is only known after a read, so this reads the field first and
	/// then asks the driver.
	pub fn is_null(&mut self, field: usize) -> Result<bool> {
		self.source.read(field)?;
		self.source.was_null(field)
	}

	pub fn completed_bytes(&self) -> u64 {
		self.source.completed_bytes()
	}

	pub fn read_time(&self) -> Duration {
		self.source.read_time()
	}

	pub fn close(&mut self) -> Result<()> {
		self.source.close()
	}

	fn mismatch(&self, cell: Cell, field: usize) -> Error {
		Error::CellMismatch {
			cell: cell.name(),
			target: self.source.columns()[field].r#type.clone(),
		}
	}
}
