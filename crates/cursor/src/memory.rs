// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory [`Driver`] over key-ordered rows.
//!
//! Tables are split into regions by key range; each region becomes one scan
//! fragment, located at the host the region was assigned to. Failures can be
//! injected into scans and closes, and the driver counts opened and closed
//! cursors so callers can check that every scan was released exactly once.

use std::{
	collections::BTreeMap,
	sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	},
};

use conduit_split::{KeyRange, Predicate, ScanFragment};
use conduit_type::{ColumnHandle, DriverError, DriverValue, TableName};
use parking_lot::{Mutex, RwLock};
use tracing::{debug, instrument};

use crate::{Driver, DriverCursor};

#[derive(Clone, Default)]
pub struct MemoryDriver {
	inner: Arc<MemoryDriverInner>,
}

#[derive(Default)]
struct MemoryDriverInner {
	tables: RwLock<BTreeMap<(Option<String>, String), MemoryTable>>,
	faults: Mutex<Faults>,
	opened: AtomicUsize,
	closed: AtomicUsize,
}

#[derive(Clone, Copy, Debug, Default)]
struct Faults {
	scan_after: Option<usize>,
	close: bool,
}

struct MemoryTable {
	name: TableName,
	columns: Vec<ColumnHandle>,
	rows: BTreeMap<Vec<u8>, Vec<DriverValue>>,
	regions: Vec<(KeyRange, String)>,
}

impl MemoryTable {
	fn fragments(&self) -> Vec<ScanFragment> {
		if self.regions.is_empty() {
			let range = KeyRange::default();
			let length = self.length(&range);
			return vec![ScanFragment::new(self.name.clone(), range).with_length(length)];
		}
		self.regions
			.iter()
			.map(|(range, location)| {
				ScanFragment::new(self.name.clone(), range.clone())
					.with_location(location.clone())
					.with_length(self.length(range))
			})
			.collect()
	}

	fn length(&self, range: &KeyRange) -> u64 {
		self.rows_in(range).map(|row| row_size(row)).sum()
	}

	fn rows_in<'a>(&'a self, range: &'a KeyRange) -> impl Iterator<Item = &'a Vec<DriverValue>> + 'a {
		self.rows.iter().filter(move |(key, _)| range.contains(key)).map(|(_, row)| row)
	}
}

fn key(table: &TableName) -> (Option<String>, String) {
	(table.schema_name.clone(), table.table_name.clone())
}

fn row_size(row: &[DriverValue]) -> u64 {
	row.iter().map(DriverValue::size_hint).sum()
}

impl MemoryDriver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create or replace `table`.
	pub fn create_table(&self, table: &TableName, columns: Vec<ColumnHandle>) {
		let mut name = table.clone();
		name.catalog_name = None;
		self.inner.tables.write().insert(
			key(table),
			MemoryTable {
				name,
				columns,
				rows: BTreeMap::new(),
				regions: Vec::new(),
			},
		);
	}

	pub fn insert(&self, table: &TableName, key: impl Into<Vec<u8>>, row: Vec<DriverValue>) -> Result<(), DriverError> {
		let mut tables = self.inner.tables.write();
		let table = tables.get_mut(&self::key(table)).ok_or_else(|| missing(table))?;
		if row.len() != table.columns.len() {
			return Err(DriverError::new(format!(
				"row has {} values, table {} has {} columns",
				row.len(),
				table.name,
				table.columns.len()
			)));
		}
		table.rows.insert(key.into(), row);
		Ok(())
	}

	/// Serve the keys in `range` from `location`. Without regions a table is
	/// a single fragment with no preferred host.
	pub fn add_region(&self, table: &TableName, range: KeyRange, location: impl Into<String>) -> Result<(), DriverError> {
		let mut tables = self.inner.tables.write();
		let table = tables.get_mut(&key(table)).ok_or_else(|| missing(table))?;
		table.regions.push((range, location.into()));
		Ok(())
	}

	/// Cursors opened from now on fail when asked for row `rows + 1`.
	pub fn fail_scan_after(&self, rows: usize) {
		self.inner.faults.lock().scan_after = Some(rows);
	}

	/// Cursors opened from now on fail to close.
	pub fn fail_on_close(&self) {
		self.inner.faults.lock().close = true;
	}

	pub fn opened(&self) -> usize {
		self.inner.opened.load(Ordering::SeqCst)
	}

	/// Number of `close` calls received by cursors of this driver.
	pub fn closed(&self) -> usize {
		self.inner.closed.load(Ordering::SeqCst)
	}
}

fn missing(table: &TableName) -> DriverError {
	DriverError::new(format!("table {} does not exist", table))
}

impl Driver for MemoryDriver {
	type Cursor = MemoryCursor;

	#[instrument(name = "driver::memory::fragments", level = "trace", skip_all, fields(table = %table))]
	fn fragments(
		&self,
		table: &TableName,
		predicate: &Predicate,
		_columns: &[ColumnHandle],
	) -> Result<Vec<ScanFragment>, DriverError> {
		let tables = self.inner.tables.read();
		let table = tables.get(&key(table)).ok_or_else(|| missing(table))?;
		if predicate.is_none() {
			return Ok(Vec::new());
		}
		Ok(table.fragments())
	}

	#[instrument(name = "driver::memory::open", level = "debug", skip_all, fields(table = %table, fragment = %fragment))]
	fn open(
		&self,
		table: &TableName,
		fragment: &ScanFragment,
		columns: &[ColumnHandle],
	) -> Result<MemoryCursor, DriverError> {
		let tables = self.inner.tables.read();
		let table = tables.get(&key(table)).ok_or_else(|| missing(table))?;

		let projection = columns
			.iter()
			.map(|column| {
				table.columns.iter().position(|c| c.name == column.name).ok_or_else(|| {
					DriverError::new(format!("column {} does not exist in {}", column.name, table.name))
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		let rows = table
			.rows_in(&fragment.key_range)
			.map(|row| projection.iter().map(|&i| row[i].clone()).collect::<Vec<_>>())
			.collect::<Vec<_>>();
		let sizes = table.rows_in(&fragment.key_range).map(|row| row_size(row)).collect();

		self.inner.opened.fetch_add(1, Ordering::SeqCst);
		debug!(rows = rows.len(), "opened memory cursor");
		Ok(MemoryCursor {
			rows,
			sizes,
			position: 0,
			last_null: None,
			closed: false,
			faults: *self.inner.faults.lock(),
			driver: Arc::clone(&self.inner),
		})
	}
}

/// Cursor over a snapshot of one fragment's rows.
pub struct MemoryCursor {
	rows: Vec<Vec<DriverValue>>,
	sizes: Vec<u64>,
	position: usize,
	last_null: Option<bool>,
	closed: bool,
	faults: Faults,
	driver: Arc<MemoryDriverInner>,
}

impl MemoryCursor {
	fn current(&self) -> Result<&Vec<DriverValue>, DriverError> {
		match self.position.checked_sub(1) {
			Some(index) if !self.closed => self.rows.get(index).ok_or_else(|| DriverError::new("cursor is exhausted")),
			_ if self.closed => Err(DriverError::new("cursor is closed")),
			_ => Err(DriverError::new("cursor is before the first row")),
		}
	}
}

impl DriverCursor for MemoryCursor {
	fn next(&mut self) -> Result<bool, DriverError> {
		if self.closed {
			return Err(DriverError::new("cursor is closed"));
		}
		if self.faults.scan_after == Some(self.position) {
			return Err(DriverError::new(format!("injected scan failure after {} rows", self.position)));
		}
		self.last_null = None;
		if self.position >= self.rows.len() {
			return Ok(false);
		}
		self.position += 1;
		Ok(true)
	}

	fn value(&mut self, field: usize) -> Result<DriverValue, DriverError> {
		let value = self
			.current()?
			.get(field)
			.cloned()
			.ok_or_else(|| DriverError::new(format!("field {} is out of range", field)))?;
		self.last_null = Some(value.is_null());
		Ok(value)
	}

	fn was_null(&self) -> Result<bool, DriverError> {
		self.last_null.ok_or_else(|| DriverError::new("no value has been read"))
	}

	fn row_size(&self) -> u64 {
		self.position.checked_sub(1).and_then(|index| self.sizes.get(index)).copied().unwrap_or(0)
	}

	fn close(&mut self) -> Result<(), DriverError> {
		self.driver.closed.fetch_add(1, Ordering::SeqCst);
		self.closed = true;
		if self.faults.close {
			return Err(DriverError::new("injected close failure"));
		}
		Ok(())
	}
}
