// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::{Duration, Instant};

use conduit_column::{Cell, convert};
use conduit_split::SplitDescriptor;
use conduit_type::{ColumnHandle, DriverValue, Error, Result, SessionZone, Type};
use tracing::{debug, instrument, warn};

use crate::{Driver, DriverCursor};

/// Locate the split's fragment among the driver's current fragments for the
/// same scan and open a cursor over it.
#[instrument(name = "cursor::open", level = "debug", skip_all, fields(table = %split.table(), columns = columns.len()))]
pub(crate) fn open_source<D: Driver>(
	driver: &D,
	split: &SplitDescriptor,
	columns: &[ColumnHandle],
	zone: SessionZone,
) -> Result<ScanSource<D::Cursor>> {
	let fragment = split.require_fragment()?;
	let not_found = || Error::FragmentNotFound {
		table: split.table().to_string(),
	};

	if !fragment.table.matches(split.table()) {
		return Err(not_found());
	}
	let planned = driver.fragments(split.table(), split.predicate(), columns)?;
	if !planned.iter().any(|f| f == fragment) {
		return Err(not_found());
	}

	let cursor = driver.open(split.table(), fragment, columns)?;
	debug!(fragment = %fragment, length = fragment.length, "opened scan");
	Ok(ScanSource::new(cursor, columns.to_vec(), zone))
}

/// A driver cursor plus the bookkeeping both cursor flavours share: the
/// closed flag, the last field read on the current row, and accounting.
///
/// Any adapter failure goes through [`ScanSource::fail`], which closes the
/// driver cursor exactly once and keeps close failures as suppressed causes.
pub(crate) struct ScanSource<C: DriverCursor> {
	cursor: C,
	columns: Vec<ColumnHandle>,
	zone: SessionZone,
	closed: bool,
	last_read: Option<usize>,
	completed_bytes: u64,
	started: Option<Instant>,
	ended: Option<Instant>,
}

impl<C: DriverCursor> ScanSource<C> {
	fn new(cursor: C, columns: Vec<ColumnHandle>, zone: SessionZone) -> Self {
		Self {
			cursor,
			columns,
			zone,
			closed: false,
			last_read: None,
			completed_bytes: 0,
			started: None,
			ended: None,
		}
	}

	pub(crate) fn columns(&self) -> &[ColumnHandle] {
		&self.columns
	}

	pub(crate) fn width(&self) -> usize {
		self.columns.len()
	}

	pub(crate) fn is_closed(&self) -> bool {
		self.closed
	}

	pub(crate) fn column_type(&self, field: usize) -> Result<&Type> {
		self.columns.get(field).map(|c| &c.r#type).ok_or(Error::InvalidField {
			field,
			width: self.columns.len(),
		})
	}

	pub(crate) fn completed_bytes(&self) -> u64 {
		self.completed_bytes
	}

	/// From the first advance until close, or until now while still open.
	pub(crate) fn read_time(&self) -> Duration {
		match (self.started, self.ended) {
			(Some(started), Some(ended)) => ended.duration_since(started),
			(Some(started), None) => started.elapsed(),
			_ => Duration::ZERO,
		}
	}

	/// Step to the next row. Exhaustion closes the source.
	pub(crate) fn advance(&mut self) -> Result<bool> {
		if self.closed {
			return Ok(false);
		}
		self.started.get_or_insert_with(Instant::now);
		self.last_read = None;

		match self.cursor.next() {
			Ok(true) => {
				self.completed_bytes += self.cursor.row_size();
				Ok(true)
			}
			Ok(false) => {
				debug!(completed_bytes = self.completed_bytes, "scan exhausted");
				self.close()?;
				Ok(false)
			}
			Err(err) => Err(self.fail(err.into())),
		}
	}

	/// Raw driver value of `field` on the current row.
	pub(crate) fn read(&mut self, field: usize) -> Result<DriverValue> {
		self.ensure_open()?;
		self.column_type(field)?;
		match self.cursor.value(field) {
			Ok(value) => {
				self.last_read = Some(field);
				Ok(value)
			}
			Err(err) => Err(self.fail(err.into())),
		}
	}

	/// Read `field` and convert it to the lane of its column type.
	pub(crate) fn cell(&mut self, field: usize) -> Result<Cell> {
		let value = self.read(field)?;
		let converted = convert(&value, &self.columns[field].r#type, &self.zone);
		converted.map_err(|err| self.fail(err))
	}

	/// The driver's null flag for `field`, which must be the field read last.
	pub(crate) fn was_null(&mut self, field: usize) -> Result<bool> {
		self.ensure_open()?;
		if self.last_read != Some(field) {
			return Err(Error::NullCheckBeforeRead {
				field,
			});
		}
		self.cursor.was_null().map_err(|err| self.fail(err.into()))
	}

	/// Close the driver cursor after `err` and hand `err` back, with any close
	/// failure attached.
	pub(crate) fn fail(&mut self, err: Error) -> Error {
		if self.closed {
			return err;
		}
		warn!(error = %err, "closing scan after failure");
		match self.close() {
			Ok(()) => err,
			Err(Error::Driver {
				source,
			}) => {
				debug!(error = %source, "close failure suppressed");
				err.with_suppressed(source)
			}
			Err(_) => err,
		}
	}

	#[instrument(name = "cursor::close", level = "debug", skip(self), fields(completed_bytes = self.completed_bytes))]
	pub(crate) fn close(&mut self) -> Result<()> {
		if self.closed {
			return Ok(());
		}
		self.closed = true;
		self.last_read = None;
		if self.started.is_some() {
			self.ended = Some(Instant::now());
		}
		self.cursor.close()?;
		Ok(())
	}

	pub(crate) fn ensure_open(&self) -> Result<()> {
		if self.closed {
			return Err(Error::CursorClosed);
		}
		Ok(())
	}
}

impl<C: DriverCursor> Drop for ScanSource<C> {
	fn drop(&mut self) {
		if let Err(err) = self.close() {
			warn!(error = %err, "failed to close scan on drop");
		}
	}
}
