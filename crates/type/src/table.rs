// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Fully qualified name of a table in the external store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableName {
	pub catalog_name: Option<String>,
	pub schema_name: Option<String>,
	pub table_name: String,
}

impl TableName {
	pub fn new(schema: Option<&str>, table: impl Into<String>) -> Self {
		Self {
			catalog_name: None,
			schema_name: schema.map(str::to_string),
			table_name: table.into(),
		}
	}

	pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
		self.catalog_name = Some(catalog.into());
		self
	}

	/// Same schema and table; the catalog only routes to a connector.
	pub fn matches(&self, other: &TableName) -> bool {
		self.schema_name == other.schema_name && self.table_name == other.table_name
	}
}

impl Display for TableName {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match &self.schema_name {
			Some(schema) => write!(f, "{}.{}", schema, self.table_name),
			None => f.write_str(&self.table_name),
		}
	}
}
