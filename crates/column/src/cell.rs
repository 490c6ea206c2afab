// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::Lane;

/// One converted field, in the lane its column type is stored in.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
	Null,
	Boolean(bool),
	Long(i64),
	Double(f64),
	Slice(Vec<u8>),
	Block(Vec<Cell>),
}

impl Cell {
	pub fn is_null(&self) -> bool {
		matches!(self, Cell::Null)
	}

	/// The lane this cell belongs to, `None` for null which fits every lane.
	pub fn lane(&self) -> Option<Lane> {
		match self {
			Cell::Null => None,
			Cell::Boolean(_) => Some(Lane::Boolean),
			Cell::Long(_) => Some(Lane::Long),
			Cell::Double(_) => Some(Lane::Double),
			Cell::Slice(_) => Some(Lane::Slice),
			Cell::Block(_) => Some(Lane::Block),
		}
	}

	pub fn name(&self) -> &'static str {
		match self {
			Cell::Null => "null",
			Cell::Boolean(_) => "boolean",
			Cell::Long(_) => "long",
			Cell::Double(_) => "double",
			Cell::Slice(_) => "slice",
			Cell::Block(_) => "block",
		}
	}
}
