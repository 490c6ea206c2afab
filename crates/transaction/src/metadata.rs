// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::BTreeMap, sync::Arc};

use conduit_type::{ColumnHandle, Error, Result, TableName};
use tracing::{debug, instrument, warn};

use crate::{MetadataClient, MetadataConfig, WriteCoordinator};

/// Catalog access and the write path of one metadata session.
///
/// `begin_create_table` and `begin_insert` register a compensating action
/// with the session's [`WriteCoordinator`]; the matching `finish_*` call
/// discards it and [`Metadata::rollback`] runs it.
pub struct Metadata<C: MetadataClient> {
	client: Arc<C>,
	coordinator: Arc<WriteCoordinator>,
	config: MetadataConfig,
}

impl<C: MetadataClient> Metadata<C> {
	pub fn new(client: Arc<C>, config: MetadataConfig) -> Self {
		Self {
			client,
			coordinator: Arc::new(WriteCoordinator::new()),
			config,
		}
	}

	pub fn client(&self) -> &Arc<C> {
		&self.client
	}

	pub fn coordinator(&self) -> &Arc<WriteCoordinator> {
		&self.coordinator
	}

	pub fn list_schema_names(&self) -> Result<Vec<String>> {
		Ok(self.client.schema_names()?)
	}

	pub fn list_tables(&self, schema: Option<&str>) -> Result<Vec<TableName>> {
		Ok(self.client.table_names(schema)?)
	}

	/// Columns a query may project, without the row key.
	pub fn list_projectable_columns(&self, table: &TableName) -> Result<Vec<ColumnHandle>> {
		self.columns(table, false)
	}

	pub fn column_handles(&self, table: &TableName) -> Result<BTreeMap<String, ColumnHandle>> {
		let columns = self.columns(table, false)?;
		Ok(columns.into_iter().map(|c| (c.name.clone(), c)).collect())
	}

	/// Columns of every table in `schema`, or of just `table` when given.
	/// Tables dropped while listing are skipped.
	pub fn list_table_columns(
		&self,
		schema: Option<&str>,
		table: Option<&str>,
	) -> Result<BTreeMap<TableName, Vec<ColumnHandle>>> {
		let tables = match table {
			Some(table) => vec![TableName::new(schema, table)],
			None => self.client.table_names(schema)?,
		};
		let mut result = BTreeMap::new();
		for table in tables {
			match self.client.columns(&table, false)? {
				Some(columns) => {
					result.insert(table, columns);
				}
				None => debug!(table = %table, "table disappeared during listing"),
			}
		}
		Ok(result)
	}

	#[instrument(name = "metadata::create_schema", level = "debug", skip(self))]
	pub fn create_schema(&self, schema: &str) -> Result<()> {
		Ok(self.client.create_schema(schema)?)
	}

	#[instrument(name = "metadata::drop_schema", level = "debug", skip(self))]
	pub fn drop_schema(&self, schema: &str) -> Result<()> {
		Ok(self.client.drop_schema(schema)?)
	}

	#[instrument(name = "metadata::create_table", level = "debug", skip_all, fields(table = %table))]
	pub fn create_table(&self, table: &TableName, columns: &[ColumnHandle], ignore_existing: bool) -> Result<()> {
		if self.client.columns(table, false)?.is_some() {
			if ignore_existing {
				return Ok(());
			}
			return Err(Error::TableExists {
				table: table.to_string(),
			});
		}
		Ok(self.client.create_table(table, columns)?)
	}

	#[instrument(name = "metadata::drop_table", level = "debug", skip_all, fields(table = %table))]
	pub fn drop_table(&self, table: &TableName) -> Result<()> {
		if !self.config.allow_drop_table {
			return Err(Error::PermissionDenied {
				operation: "DROP TABLE".to_string(),
			});
		}
		Ok(self.client.drop_table(table)?)
	}

	pub fn add_column(&self, table: &TableName, column: &ColumnHandle) -> Result<()> {
		Ok(self.client.add_column(table, column)?)
	}

	pub fn drop_column(&self, table: &TableName, column: &str) -> Result<()> {
		Ok(self.client.drop_column(table, column)?)
	}

	/// Create `table` for a CREATE TABLE AS write; rolling back drops it.
	#[instrument(name = "metadata::begin_create_table", level = "debug", skip_all, fields(table = %table))]
	pub fn begin_create_table(&self, table: &TableName, columns: &[ColumnHandle]) -> Result<()> {
		self.coordinator.ensure_idle()?;
		self.client.create_table(table, columns)?;

		let client = Arc::clone(&self.client);
		let created = table.clone();
		let registered = self.coordinator.begin_write(move || {
			debug!(table = %created, "dropping table created by aborted write");
			Ok(client.drop_table(&created)?)
		});

		if let Err(err) = registered {
			// another write won the race after the idle check
			warn!(table = %table, "write began concurrently, dropping new table");
			return match self.client.drop_table(table) {
				Ok(()) => Err(err),
				Err(drop_err) => Err(err.with_suppressed(drop_err)),
			};
		}
		Ok(())
	}

	pub fn finish_create_table(&self) -> bool {
		self.coordinator.finish()
	}

	/// Prepare an insert into `table`, returning every column the writer
	/// must supply, row key included.
	#[instrument(name = "metadata::begin_insert", level = "debug", skip_all, fields(table = %table))]
	pub fn begin_insert(&self, table: &TableName) -> Result<Vec<ColumnHandle>> {
		self.coordinator.ensure_idle()?;
		let columns = self.columns(table, true)?;
		self.client.begin_insert(table, &columns)?;

		let client = Arc::clone(&self.client);
		let target = table.clone();
		let registered = self.coordinator.begin_write(move || Ok(client.abort_insert(&target)?));

		if let Err(err) = registered {
			return match self.client.abort_insert(table) {
				Ok(()) => Err(err),
				Err(abort_err) => Err(err.with_suppressed(abort_err)),
			};
		}
		Ok(columns)
	}

	pub fn finish_insert(&self) -> bool {
		self.coordinator.finish()
	}

	pub fn rollback(&self) -> Result<()> {
		self.coordinator.rollback()
	}

	fn columns(&self, table: &TableName, include_row_key: bool) -> Result<Vec<ColumnHandle>> {
		self.client.columns(table, include_row_key)?.ok_or_else(|| Error::TableNotFound {
			table: table.to_string(),
		})
	}
}
