// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Type;

/// A column of a table as seen by the adapter. Identity is the name; the
/// metadata layer owns handles and cursors only ever borrow them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnHandle {
	pub name: String,
	#[serde(rename = "type")]
	pub r#type: Type,
}

impl ColumnHandle {
	pub fn new(name: impl Into<String>, r#type: Type) -> Self {
		Self {
			name: name.into(),
			r#type,
		}
	}
}

impl Display for ColumnHandle {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.name, self.r#type)
	}
}
