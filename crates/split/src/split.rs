// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use base64::{Engine, prelude::BASE64_STANDARD};
use conduit_type::{Error, Result, TableName};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, instrument, warn};

use crate::{HostAddress, Predicate, ScanFragment};

/// One unit of parallel read work.
///
/// The scan fragment travels as an opaque base64 token. The token text is
/// kept exactly as received so a descriptor re-serializes byte for byte; the
/// decoded fragment sits beside it. A token that fails to decode yields a
/// descriptor without a fragment, and the failure only surfaces when a
/// cursor is opened over it.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitDescriptor {
	table: TableName,
	predicate: Predicate,
	token: String,
	fragment: Option<ScanFragment>,
}

impl SplitDescriptor {
	pub fn new(table: TableName, predicate: Predicate, fragment: ScanFragment) -> Result<Self> {
		let token = BASE64_STANDARD.encode(fragment.to_bytes()?);
		Ok(Self {
			table,
			predicate,
			token,
			fragment: Some(fragment),
		})
	}

	/// Rebuild a descriptor from its transport pieces. Never fails: a bad
	/// token leaves the fragment absent.
	#[instrument(name = "split::from_parts", level = "trace", skip_all, fields(table = %table))]
	pub fn from_parts(table: TableName, predicate: Predicate, token: String) -> Self {
		let fragment = match decode_token(&token) {
			Ok(fragment) => Some(fragment),
			Err(err) => {
				warn!(table = %table, error = %err, "discarding undecodable scan token");
				None
			}
		};
		Self {
			table,
			predicate,
			token,
			fragment,
		}
	}

	pub fn table(&self) -> &TableName {
		&self.table
	}

	pub fn catalog_name(&self) -> Option<&str> {
		self.table.catalog_name.as_deref()
	}

	pub fn schema_name(&self) -> Option<&str> {
		self.table.schema_name.as_deref()
	}

	pub fn table_name(&self) -> &str {
		&self.table.table_name
	}

	pub fn predicate(&self) -> &Predicate {
		&self.predicate
	}

	pub fn opaque_scan_token(&self) -> &str {
		&self.token
	}

	pub fn fragment(&self) -> Option<&ScanFragment> {
		self.fragment.as_ref()
	}

	/// The decoded fragment, or [`Error::MissingFragment`] for a descriptor
	/// whose token did not survive transport.
	pub fn require_fragment(&self) -> Result<&ScanFragment> {
		self.fragment.as_ref().ok_or_else(|| Error::MissingFragment {
			table: self.table.to_string(),
		})
	}

	/// Preferred hosts: the first location of the fragment, if it parses.
	pub fn addresses(&self) -> Vec<HostAddress> {
		let Some(location) = self.fragment.as_ref().and_then(|f| f.locations.first()) else {
			return Vec::new();
		};
		match location.parse::<HostAddress>() {
			Ok(address) => vec![address],
			Err(reason) => {
				debug!(location = %location, reason = %reason, "ignoring unparsable fragment location");
				Vec::new()
			}
		}
	}

	/// Any worker may run this split; addresses are only a hint.
	pub fn is_remotely_accessible(&self) -> bool {
		true
	}
}

fn decode_token(token: &str) -> Result<ScanFragment> {
	let bytes = BASE64_STANDARD.decode(token).map_err(|e| Error::InvalidFragment {
		reason: e.to_string(),
	})?;
	ScanFragment::from_bytes(&bytes)
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Wire {
	#[serde(default)]
	catalog_name: Option<String>,
	#[serde(default)]
	schema_name: Option<String>,
	table_name: String,
	#[serde(default)]
	predicate: Predicate,
	opaque_scan_token: String,
	#[serde(default)]
	address_hints: Vec<HostAddress>,
}

impl Serialize for SplitDescriptor {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		Wire {
			catalog_name: self.table.catalog_name.clone(),
			schema_name: self.table.schema_name.clone(),
			table_name: self.table.table_name.clone(),
			predicate: self.predicate.clone(),
			opaque_scan_token: self.token.clone(),
			address_hints: self.addresses(),
		}
		.serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for SplitDescriptor {
	fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		// address hints are derived from the fragment, the wire copy is informational
		let wire = Wire::deserialize(deserializer)?;
		let table = TableName {
			catalog_name: wire.catalog_name,
			schema_name: wire.schema_name,
			table_name: wire.table_name,
		};
		Ok(SplitDescriptor::from_parts(table, wire.predicate, wire.opaque_scan_token))
	}
}
