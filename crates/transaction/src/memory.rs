// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory [`MetadataClient`].

use std::collections::{BTreeMap, BTreeSet};

use conduit_type::{ColumnHandle, DriverError, TableName, Type};
use parking_lot::{Mutex, RwLock};

use crate::MetadataClient;

/// Name of the hidden row key column every table carries.
pub const ROW_KEY_COLUMN: &str = "_row_key";

#[derive(Default)]
pub struct MemoryClient {
	schemas: RwLock<BTreeSet<String>>,
	tables: RwLock<BTreeMap<TableName, Vec<ColumnHandle>>>,
	inserts: Mutex<Vec<InsertEvent>>,
	fail_drop: Mutex<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsertEvent {
	Begun(TableName),
	Aborted(TableName),
}

fn normalize(table: &TableName) -> TableName {
	TableName {
		catalog_name: None,
		..table.clone()
	}
}

fn missing(table: &TableName) -> DriverError {
	DriverError::new(format!("table {} does not exist", table))
}

impl MemoryClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn has_table(&self, table: &TableName) -> bool {
		self.tables.read().contains_key(&normalize(table))
	}

	/// Begin and abort calls received so far, oldest first.
	pub fn insert_events(&self) -> Vec<InsertEvent> {
		self.inserts.lock().clone()
	}

	/// Make every following `drop_table` fail.
	pub fn fail_drop(&self, fail: bool) {
		*self.fail_drop.lock() = fail;
	}
}

impl MetadataClient for MemoryClient {
	fn schema_names(&self) -> Result<Vec<String>, DriverError> {
		Ok(self.schemas.read().iter().cloned().collect())
	}

	fn table_names(&self, schema: Option<&str>) -> Result<Vec<TableName>, DriverError> {
		Ok(self
			.tables
			.read()
			.keys()
			.filter(|t| schema.is_none() || t.schema_name.as_deref() == schema)
			.cloned()
			.collect())
	}

	fn columns(&self, table: &TableName, include_row_key: bool) -> Result<Option<Vec<ColumnHandle>>, DriverError> {
		let tables = self.tables.read();
		Ok(tables.get(&normalize(table)).map(|columns| {
			let mut result = Vec::with_capacity(columns.len() + 1);
			if include_row_key {
				result.push(ColumnHandle::new(ROW_KEY_COLUMN, Type::Varbinary));
			}
			result.extend(columns.iter().cloned());
			result
		}))
	}

	fn create_schema(&self, schema: &str) -> Result<(), DriverError> {
		if !self.schemas.write().insert(schema.to_string()) {
			return Err(DriverError::new(format!("schema {} already exists", schema)));
		}
		Ok(())
	}

	fn drop_schema(&self, schema: &str) -> Result<(), DriverError> {
		if self.tables.read().keys().any(|t| t.schema_name.as_deref() == Some(schema)) {
			return Err(DriverError::new(format!("schema {} is not empty", schema)));
		}
		if !self.schemas.write().remove(schema) {
			return Err(DriverError::new(format!("schema {} does not exist", schema)));
		}
		Ok(())
	}

	fn create_table(&self, table: &TableName, columns: &[ColumnHandle]) -> Result<(), DriverError> {
		let mut tables = self.tables.write();
		let name = normalize(table);
		if tables.contains_key(&name) {
			return Err(DriverError::new(format!("table {} already exists", table)));
		}
		tables.insert(name, columns.to_vec());
		Ok(())
	}

	fn drop_table(&self, table: &TableName) -> Result<(), DriverError> {
		if *self.fail_drop.lock() {
			return Err(DriverError::new(format!("cannot drop {}", table)));
		}
		self.tables.write().remove(&normalize(table)).map(|_| ()).ok_or_else(|| missing(table))
	}

	fn add_column(&self, table: &TableName, column: &ColumnHandle) -> Result<(), DriverError> {
		let mut tables = self.tables.write();
		let columns = tables.get_mut(&normalize(table)).ok_or_else(|| missing(table))?;
		if columns.iter().any(|c| c.name == column.name) {
			return Err(DriverError::new(format!("column {} already exists in {}", column.name, table)));
		}
		columns.push(column.clone());
		Ok(())
	}

	fn drop_column(&self, table: &TableName, column: &str) -> Result<(), DriverError> {
		let mut tables = self.tables.write();
		let columns = tables.get_mut(&normalize(table)).ok_or_else(|| missing(table))?;
		let before = columns.len();
		columns.retain(|c| c.name != column);
		if columns.len() == before {
			return Err(DriverError::new(format!("column {} does not exist in {}", column, table)));
		}
		Ok(())
	}

	fn begin_insert(&self, table: &TableName, _columns: &[ColumnHandle]) -> Result<(), DriverError> {
		if !self.has_table(table) {
			return Err(missing(table));
		}
		self.inserts.lock().push(InsertEvent::Begun(normalize(table)));
		Ok(())
	}

	fn abort_insert(&self, table: &TableName) -> Result<(), DriverError> {
		self.inserts.lock().push(InsertEvent::Aborted(normalize(table)));
		Ok(())
	}
}
