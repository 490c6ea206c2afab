// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Catalog operations of the external store, as the metadata layer needs them.

use conduit_type::{ColumnHandle, DriverError, TableName};

pub trait MetadataClient: Send + Sync + 'static {
	fn schema_names(&self) -> Result<Vec<String>, DriverError>;

	/// Tables of `schema`, or of every schema when `None`.
	fn table_names(&self, schema: Option<&str>) -> Result<Vec<TableName>, DriverError>;

	/// Columns of `table` in declaration order, `None` when it does not exist.
	/// The store's row key column is only listed with `include_row_key`.
	fn columns(&self, table: &TableName, include_row_key: bool) -> Result<Option<Vec<ColumnHandle>>, DriverError>;

	fn create_schema(&self, schema: &str) -> Result<(), DriverError>;

	fn drop_schema(&self, schema: &str) -> Result<(), DriverError>;

	fn create_table(&self, table: &TableName, columns: &[ColumnHandle]) -> Result<(), DriverError>;

	fn drop_table(&self, table: &TableName) -> Result<(), DriverError>;

	fn add_column(&self, table: &TableName, column: &ColumnHandle) -> Result<(), DriverError>;

	fn drop_column(&self, table: &TableName, column: &str) -> Result<(), DriverError>;

	/// Prepare `table` for an insert writing `columns`.
	fn begin_insert(&self, table: &TableName, columns: &[ColumnHandle]) -> Result<(), DriverError>;

	/// Undo whatever [`MetadataClient::begin_insert`] prepared.
	fn abort_insert(&self, _table: &TableName) -> Result<(), DriverError> {
		Ok(())
	}
}
