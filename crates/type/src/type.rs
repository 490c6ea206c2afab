// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest precision whose unscaled value always fits an `i64`.
pub const MAX_SHORT_PRECISION: u8 = 18;

/// Largest precision whose unscaled value always fits an `i128`.
pub const MAX_PRECISION: u8 = 38;

/// The column types the consuming engine understands.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// true or false
	Boolean,
	/// A 1-byte signed integer
	TinyInt,
	/// A 2-byte signed integer
	SmallInt,
	/// A 4-byte signed integer
	Integer,
	/// An 8-byte signed integer
	BigInt,
	/// A 4-byte floating point, stored as its raw bit pattern
	Real,
	/// An 8-byte floating point
	Double,
	/// A fixed point number with `precision` total digits and `scale`
	/// digits after the decimal point
	Decimal {
		precision: u8,
		scale: u8,
	},
	/// Days since the Unix epoch
	Date,
	/// Milliseconds since midnight
	Time,
	/// Milliseconds since the Unix epoch
	Timestamp,
	/// UTF-8 text with an optional maximum length
	Varchar(Option<u32>),
	/// Fixed width UTF-8 text, blank padded by the store
	Char(u32),
	/// Raw bytes
	Varbinary,
	/// An ordered list of elements of one type
	Array(Box<Type>),
}

/// The physical representation a column of a given [`Type`] is stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lane {
	Boolean,
	Long,
	Double,
	Slice,
	Block,
}

impl Type {
	pub fn decimal(precision: u8, scale: u8) -> Result<Self> {
		if precision == 0 || precision > MAX_PRECISION || scale > precision {
			return Err(Error::InvalidDecimalType {
				precision,
				scale,
			});
		}
		Ok(Type::Decimal {
			precision,
			scale,
		})
	}

	pub fn array(element: Type) -> Self {
		Type::Array(Box::new(element))
	}

	pub fn varchar() -> Self {
		Type::Varchar(None)
	}

	pub fn lane(&self) -> Lane {
		match self {
			Type::Boolean => Lane::Boolean,
			Type::TinyInt
			| Type::SmallInt
			| Type::Integer
			| Type::BigInt
			| Type::Real
			| Type::Date
			| Type::Time
			| Type::Timestamp => Lane::Long,
			Type::Decimal {
				..
			} if self.is_short_decimal() => Lane::Long,
			Type::Decimal {
				..
			} => Lane::Slice,
			Type::Double => Lane::Double,
			Type::Varchar(_) | Type::Char(_) | Type::Varbinary => Lane::Slice,
			Type::Array(_) => Lane::Block,
		}
	}

	pub fn is_short_decimal(&self) -> bool {
		matches!(self, Type::Decimal { precision, .. } if *precision <= MAX_SHORT_PRECISION)
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Type::Array(_))
	}

	pub fn element_type(&self) -> Option<&Type> {
		match self {
			Type::Array(element) => Some(element),
			_ => None,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Type::Boolean => f.write_str("boolean"),
			Type::TinyInt => f.write_str("tinyint"),
			Type::SmallInt => f.write_str("smallint"),
			Type::Integer => f.write_str("integer"),
			Type::BigInt => f.write_str("bigint"),
			Type::Real => f.write_str("real"),
			Type::Double => f.write_str("double"),
			Type::Decimal {
				precision,
				scale,
			} => write!(f, "decimal({},{})", precision, scale),
			Type::Date => f.write_str("date"),
			Type::Time => f.write_str("time"),
			Type::Timestamp => f.write_str("timestamp"),
			Type::Varchar(None) => f.write_str("varchar"),
			Type::Varchar(Some(len)) => write!(f, "varchar({})", len),
			Type::Char(len) => write!(f, "char({})", len),
			Type::Varbinary => f.write_str("varbinary"),
			Type::Array(element) => write!(f, "array({})", element),
		}
	}
}
