// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use bigdecimal::BigDecimal;

/// A field value as handed out by the driver, before coercion.
///
/// Temporal values are instants in milliseconds since the epoch. The driver
/// builds `Date` and `Time` by composing wall-clock fields in the session
/// zone, so their instants are only meaningful together with that zone.
#[derive(Clone, Debug, PartialEq)]
pub enum DriverValue {
	Null,
	Boolean(bool),
	Byte(i8),
	Short(i16),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	Decimal(BigDecimal),
	String(String),
	Bytes(Vec<u8>),
	Date(i64),
	Time(i64),
	Timestamp(i64),
	Array(Vec<DriverValue>),
}

/// The representation class of a [`DriverValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueShape {
	Null,
	Boolean,
	Byte,
	Short,
	Int,
	Long,
	Float,
	Double,
	Decimal,
	String,
	Bytes,
	Date,
	Time,
	Timestamp,
	Array,
}

impl Display for ValueShape {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			ValueShape::Null => "null",
			ValueShape::Boolean => "boolean",
			ValueShape::Byte => "byte",
			ValueShape::Short => "short",
			ValueShape::Int => "int",
			ValueShape::Long => "long",
			ValueShape::Float => "float",
			ValueShape::Double => "double",
			ValueShape::Decimal => "decimal",
			ValueShape::String => "string",
			ValueShape::Bytes => "bytes",
			ValueShape::Date => "date",
			ValueShape::Time => "time",
			ValueShape::Timestamp => "timestamp",
			ValueShape::Array => "array",
		};
		f.write_str(name)
	}
}

impl DriverValue {
	pub fn shape(&self) -> ValueShape {
		match self {
			DriverValue::Null => ValueShape::Null,
			DriverValue::Boolean(_) => ValueShape::Boolean,
			DriverValue::Byte(_) => ValueShape::Byte,
			DriverValue::Short(_) => ValueShape::Short,
			DriverValue::Int(_) => ValueShape::Int,
			DriverValue::Long(_) => ValueShape::Long,
			DriverValue::Float(_) => ValueShape::Float,
			DriverValue::Double(_) => ValueShape::Double,
			DriverValue::Decimal(_) => ValueShape::Decimal,
			DriverValue::String(_) => ValueShape::String,
			DriverValue::Bytes(_) => ValueShape::Bytes,
			DriverValue::Date(_) => ValueShape::Date,
			DriverValue::Time(_) => ValueShape::Time,
			DriverValue::Timestamp(_) => ValueShape::Timestamp,
			DriverValue::Array(_) => ValueShape::Array,
		}
	}

	pub fn is_null(&self) -> bool {
		matches!(self, DriverValue::Null)
	}

	/// The instant behind any temporal value. Dates, times and timestamps
	/// share one representation in the driver, so each is accepted wherever
	/// an instant is expected.
	pub fn as_instant(&self) -> Option<i64> {
		match self {
			DriverValue::Date(millis) | DriverValue::Time(millis) | DriverValue::Timestamp(millis) => {
				Some(*millis)
			}
			_ => None,
		}
	}

	/// Approximate number of bytes the value occupies on the wire.
	pub fn size_hint(&self) -> u64 {
		match self {
			DriverValue::Null => 0,
			DriverValue::Boolean(_) | DriverValue::Byte(_) => 1,
			DriverValue::Short(_) => 2,
			DriverValue::Int(_) | DriverValue::Float(_) => 4,
			DriverValue::Long(_)
			| DriverValue::Double(_)
			| DriverValue::Date(_)
			| DriverValue::Time(_)
			| DriverValue::Timestamp(_) => 8,
			DriverValue::Decimal(_) => 16,
			DriverValue::String(s) => s.len() as u64,
			DriverValue::Bytes(b) => b.len() as u64,
			DriverValue::Array(values) => values.iter().map(DriverValue::size_hint).sum(),
		}
	}
}

macro_rules! impl_from {
	($t:ty, $variant:ident) => {
		impl From<$t> for DriverValue {
			fn from(value: $t) -> Self {
				DriverValue::$variant(value)
			}
		}
	};
}

impl_from!(bool, Boolean);
impl_from!(i8, Byte);
impl_from!(i16, Short);
impl_from!(i32, Int);
impl_from!(i64, Long);
impl_from!(f32, Float);
impl_from!(f64, Double);
impl_from!(BigDecimal, Decimal);
impl_from!(String, String);
impl_from!(Vec<u8>, Bytes);

impl From<&str> for DriverValue {
	fn from(value: &str) -> Self {
		DriverValue::String(value.to_string())
	}
}

impl<T: Into<DriverValue>> From<Option<T>> for DriverValue {
	fn from(value: Option<T>) -> Self {
		value.map_or(DriverValue::Null, Into::into)
	}
}
