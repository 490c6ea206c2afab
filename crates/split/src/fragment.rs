// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use conduit_type::{Error, Result, TableName};
use serde::{Deserialize, Serialize};

/// Half-open row key interval `[start, end)`; an empty `end` is unbounded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRange {
	pub start: Vec<u8>,
	pub end: Vec<u8>,
}

impl KeyRange {
	pub fn new(start: impl Into<Vec<u8>>, end: impl Into<Vec<u8>>) -> Self {
		Self {
			start: start.into(),
			end: end.into(),
		}
	}

	pub fn contains(&self, key: &[u8]) -> bool {
		key >= self.start.as_slice() && (self.end.is_empty() || key < self.end.as_slice())
	}
}

/// The physical unit a split scans: one key range of one table together with
/// the hosts that serve it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanFragment {
	pub table: TableName,
	pub key_range: KeyRange,
	pub locations: Vec<String>,
	pub length: u64,
}

impl ScanFragment {
	pub fn new(table: TableName, key_range: KeyRange) -> Self {
		Self {
			table,
			key_range,
			locations: Vec::new(),
			length: 0,
		}
	}

	pub fn with_location(mut self, location: impl Into<String>) -> Self {
		self.locations.push(location.into());
		self
	}

	pub fn with_length(mut self, length: u64) -> Self {
		self.length = length;
		self
	}

	pub fn to_bytes(&self) -> Result<Vec<u8>> {
		postcard::to_stdvec(self).map_err(|e| Error::InvalidFragment {
			reason: e.to_string(),
		})
	}

	/// Decode a fragment; trailing bytes count as corruption.
	pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
		let (fragment, rest) = postcard::take_from_bytes::<ScanFragment>(bytes).map_err(|e| Error::InvalidFragment {
			reason: e.to_string(),
		})?;
		if !rest.is_empty() {
			return Err(Error::InvalidFragment {
				reason: format!("{} trailing bytes", rest.len()),
			});
		}
		Ok(fragment)
	}
}

impl Display for ScanFragment {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}[{:02x?}..{:02x?})", self.table, self.key_range.start, self.key_range.end)
	}
}
