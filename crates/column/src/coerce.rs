// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Conversion of driver-native values into engine cells.
//!
//! Every column type has a mapping rule, so the match over [`Type`] is
//! exhaustive. A value whose representation class does not fit its column
//! (text for a `BIGINT`, a long for a `VARCHAR`, a scalar for an `ARRAY`) is
//! lossy external data and becomes null. Only a value of the right class that
//! cannot be represented, such as a decimal wider than its column, aborts the
//! read.

use bigdecimal::BigDecimal;
use conduit_type::{
	DriverValue, Error, Result, SessionZone, Type, decimal,
	temporal::{epoch_days, millis_of_day},
};
use num_traits::ToPrimitive;
use tracing::trace;

use crate::Cell;

/// Convert one driver value into a cell of `target`'s lane.
pub fn convert(value: &DriverValue, target: &Type, zone: &SessionZone) -> Result<Cell> {
	if value.is_null() {
		return Ok(Cell::Null);
	}

	let cell = match target {
		Type::Boolean => match value {
			DriverValue::Boolean(b) => Some(Cell::Boolean(*b)),
			_ => None,
		},
		Type::TinyInt => integer(value, target)?.map(|v| Cell::Long(v as i8 as i64)),
		Type::SmallInt => integer(value, target)?.map(|v| Cell::Long(v as i16 as i64)),
		Type::Integer => integer(value, target)?.map(|v| Cell::Long(v as i32 as i64)),
		Type::BigInt => integer(value, target)?.map(Cell::Long),
		Type::Real => double(value).map(|v| Cell::Long((v as f32).to_bits() as i32 as i64)),
		Type::Double => double(value).map(Cell::Double),
		Type::Decimal {
			..
		} => match to_decimal(value) {
			Some(value) if target.is_short_decimal() => Some(Cell::Long(decimal::encode_short(&value, target)?)),
			Some(value) => Some(Cell::Slice(decimal::encode_long(&value, target)?)),
			None => None,
		},
		Type::Date => match value.as_instant() {
			Some(instant) => Some(Cell::Long(epoch_days(instant, zone)?)),
			None => None,
		},
		Type::Time => match value.as_instant() {
			Some(instant) => Some(Cell::Long(millis_of_day(instant, zone)?)),
			None => None,
		},
		Type::Timestamp => value.as_instant().map(Cell::Long),
		Type::Varchar(_) => match value {
			DriverValue::String(s) => Some(Cell::Slice(s.as_bytes().to_vec())),
			_ => None,
		},
		Type::Char(_) => match value {
			DriverValue::String(s) => Some(Cell::Slice(s.trim_end_matches(' ').as_bytes().to_vec())),
			_ => None,
		},
		Type::Varbinary => match value {
			DriverValue::Bytes(bytes) => Some(Cell::Slice(bytes.clone())),
			_ => None,
		},
		Type::Array(element) => match value {
			DriverValue::Array(values) => {
				let cells = values.iter().map(|v| convert(v, element, zone)).collect::<Result<Vec<_>>>()?;
				Some(Cell::Block(cells))
			}
			_ => None,
		},
	};

	Ok(cell.unwrap_or_else(|| {
		trace!(shape = %value.shape(), target = %target, "value does not fit column, writing null");
		Cell::Null
	}))
}

/// The value as a 64-bit integer, `None` for a non-numeric value.
fn integer(value: &DriverValue, target: &Type) -> Result<Option<i64>> {
	let result = match value {
		DriverValue::Byte(v) => *v as i64,
		DriverValue::Short(v) => *v as i64,
		DriverValue::Int(v) => *v as i64,
		DriverValue::Long(v) => *v,
		DriverValue::Float(v) => *v as i64,
		DriverValue::Double(v) => *v as i64,
		DriverValue::Decimal(d) => d.with_scale(0).to_i64().ok_or_else(|| Error::DecimalOverflow {
			value: d.to_string(),
			target: target.clone(),
		})?,
		_ => return Ok(None),
	};
	Ok(Some(result))
}

fn double(value: &DriverValue) -> Option<f64> {
	match value {
		DriverValue::Byte(v) => Some(*v as f64),
		DriverValue::Short(v) => Some(*v as f64),
		DriverValue::Int(v) => Some(*v as f64),
		DriverValue::Long(v) => Some(*v as f64),
		DriverValue::Float(v) => Some(*v as f64),
		DriverValue::Double(v) => Some(*v),
		DriverValue::Decimal(d) => d.to_f64(),
		_ => None,
	}
}

fn to_decimal(value: &DriverValue) -> Option<BigDecimal> {
	match value {
		DriverValue::Decimal(d) => Some(d.clone()),
		DriverValue::Byte(v) => Some(BigDecimal::from(*v)),
		DriverValue::Short(v) => Some(BigDecimal::from(*v)),
		DriverValue::Int(v) => Some(BigDecimal::from(*v)),
		DriverValue::Long(v) => Some(BigDecimal::from(*v)),
		_ => None,
	}
}
