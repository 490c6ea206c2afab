// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Unscaled decimal encodings.
//!
//! A short decimal (precision up to 18) is stored as its unscaled `i64`. A
//! long decimal is stored as its unscaled value in 16 big-endian two's
//! complement bytes. The scale lives in the column type, never in the value.

use bigdecimal::{BigDecimal, RoundingMode};
use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

use crate::{Error, Result, Type};

pub const LONG_DECIMAL_BYTES: usize = 16;

/// The unscaled value of `value` at `scale`, rounding half-up when digits are
/// dropped.
pub fn unscaled(value: &BigDecimal, scale: u8) -> BigInt {
	let (unscaled, _) = value.with_scale_round(scale as i64, RoundingMode::HalfUp).into_bigint_and_exponent();
	unscaled
}

fn check_precision(unscaled: &BigInt, value: &BigDecimal, target: &Type) -> Result<()> {
	let Type::Decimal {
		precision,
		..
	} = target
	else {
		return Err(overflow(value, target));
	};
	if unscaled.magnitude() >= &BigUint::from(10u8).pow(*precision as u32) {
		return Err(overflow(value, target));
	}
	Ok(())
}

fn overflow(value: &BigDecimal, target: &Type) -> Error {
	Error::DecimalOverflow {
		value: value.to_string(),
		target: target.clone(),
	}
}

pub fn encode_short(value: &BigDecimal, target: &Type) -> Result<i64> {
	let Type::Decimal {
		scale,
		..
	} = target
	else {
		return Err(overflow(value, target));
	};
	let unscaled = unscaled(value, *scale);
	check_precision(&unscaled, value, target)?;
	unscaled.to_i64().ok_or_else(|| overflow(value, target))
}

pub fn encode_long(value: &BigDecimal, target: &Type) -> Result<Vec<u8>> {
	let Type::Decimal {
		scale,
		..
	} = target
	else {
		return Err(overflow(value, target));
	};
	let unscaled = unscaled(value, *scale);
	check_precision(&unscaled, value, target)?;
	let unscaled = unscaled.to_i128().ok_or_else(|| overflow(value, target))?;
	Ok(unscaled.to_be_bytes().to_vec())
}

pub fn decode_short(unscaled: i64, scale: u8) -> BigDecimal {
	BigDecimal::new(BigInt::from(unscaled), scale as i64)
}

pub fn decode_long(bytes: &[u8], scale: u8) -> Result<BigDecimal> {
	let bytes: [u8; LONG_DECIMAL_BYTES] = bytes.try_into().map_err(|_| Error::InvalidDecimalEncoding {
		len: bytes.len(),
	})?;
	Ok(BigDecimal::new(BigInt::from(i128::from_be_bytes(bytes)), scale as i64))
}
