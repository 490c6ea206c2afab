// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pushed-down filter carried by a split.
//!
//! The cursor never evaluates a predicate; it is handed to the driver when
//! fragments are planned and travels with the split so a remote worker sees
//! the same filter.

use conduit_type::ColumnHandle;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Literal {
	Boolean(bool),
	Long(i64),
	Double(f64),
	Text(String),
	Bytes(Vec<u8>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bound {
	Unbounded,
	Inclusive(Literal),
	Exclusive(Literal),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Range {
	pub low: Bound,
	pub high: Bound,
}

impl Range {
	pub fn all() -> Self {
		Self {
			low: Bound::Unbounded,
			high: Bound::Unbounded,
		}
	}

	pub fn equal(value: Literal) -> Self {
		Self {
			low: Bound::Inclusive(value.clone()),
			high: Bound::Inclusive(value),
		}
	}

	pub fn greater_than(value: Literal) -> Self {
		Self {
			low: Bound::Exclusive(value),
			high: Bound::Unbounded,
		}
	}

	pub fn less_than(value: Literal) -> Self {
		Self {
			low: Bound::Unbounded,
			high: Bound::Exclusive(value),
		}
	}
}

/// Values a column may take: the union of `ranges`, plus null when allowed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
	pub ranges: Vec<Range>,
	pub null_allowed: bool,
}

impl Domain {
	pub fn single_value(value: Literal) -> Self {
		Self {
			ranges: vec![Range::equal(value)],
			null_allowed: false,
		}
	}

	pub fn only_null() -> Self {
		Self {
			ranges: Vec::new(),
			null_allowed: true,
		}
	}

	pub fn not_null() -> Self {
		Self {
			ranges: vec![Range::all()],
			null_allowed: false,
		}
	}

	pub fn is_none(&self) -> bool {
		self.ranges.is_empty() && !self.null_allowed
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDomain {
	pub column: ColumnHandle,
	pub domain: Domain,
}

/// Conjunction of per-column domains.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Predicate {
	#[default]
	All,
	None,
	Domains(Vec<ColumnDomain>),
}

impl Predicate {
	pub fn all() -> Self {
		Predicate::All
	}

	pub fn none() -> Self {
		Predicate::None
	}

	/// Narrow the predicate by one more column. An empty domain collapses the
	/// whole predicate to [`Predicate::None`].
	pub fn and(self, column: ColumnHandle, domain: Domain) -> Self {
		if domain.is_none() {
			return Predicate::None;
		}
		match self {
			Predicate::None => Predicate::None,
			Predicate::All => Predicate::Domains(vec![ColumnDomain {
				column,
				domain,
			}]),
			Predicate::Domains(mut domains) => {
				domains.push(ColumnDomain {
					column,
					domain,
				});
				Predicate::Domains(domains)
			}
		}
	}

	pub fn is_all(&self) -> bool {
		matches!(self, Predicate::All)
	}

	pub fn is_none(&self) -> bool {
		matches!(self, Predicate::None)
	}

	/// Columns constrained by this predicate, in insertion order.
	pub fn columns(&self) -> Vec<&ColumnHandle> {
		match self {
			Predicate::Domains(domains) => domains.iter().map(|d| &d.column).collect(),
			_ => Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use conduit_type::Type;

	use super::*;

	#[test]
	fn test_and_accumulates() {
		let id = ColumnHandle::new("id", Type::BigInt);
		let name = ColumnHandle::new("name", Type::varchar());
		let predicate = Predicate::all()
			.and(id.clone(), Domain::single_value(Literal::Long(7)))
			.and(name.clone(), Domain::not_null());

		assert_eq!(predicate.columns(), vec![&id, &name]);
		assert!(!predicate.is_all());
	}

	#[test]
	fn test_empty_domain_collapses() {
		let id = ColumnHandle::new("id", Type::BigInt);
		let empty = Domain {
			ranges: Vec::new(),
			null_allowed: false,
		};
		assert!(Predicate::all().and(id.clone(), empty).is_none());
		assert!(Predicate::none().and(id, Domain::only_null()).is_none());
	}

	#[test]
	fn test_json_shape() {
		let predicate = Predicate::all()
			.and(ColumnHandle::new("id", Type::BigInt), Domain::single_value(Literal::Long(7)));
		let json = serde_json::to_value(&predicate).unwrap();
		assert_eq!(json["domains"][0]["column"]["name"], "id");
		assert_eq!(json["domains"][0]["domain"]["nullAllowed"], false);
		assert_eq!(serde_json::from_value::<Predicate>(json).unwrap(), predicate);
	}
}
