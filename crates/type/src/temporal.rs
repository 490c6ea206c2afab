// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reinterpretation of driver instants.
//!
//! The driver composes `DATE` and `TIME` values from wall-clock fields in the
//! session zone and hands them out as instants. The engine wants zone-naive
//! encodings, so the wall-clock fields are re-read as if they were UTC before
//! counting days or milliseconds of day. Timestamps are left untouched.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// The zone the driver used to compose local wall-clock values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionZone {
	/// The zone of the running process.
	#[default]
	Local,
	/// A constant offset east of UTC.
	Fixed {
		offset_seconds: i32,
	},
}

impl SessionZone {
	pub fn utc() -> Self {
		SessionZone::Fixed {
			offset_seconds: 0,
		}
	}

	pub fn fixed(offset_seconds: i32) -> Self {
		SessionZone::Fixed {
			offset_seconds,
		}
	}

	/// Offset from UTC in milliseconds in effect at `instant`.
	pub fn offset_millis_at(&self, instant: i64) -> Result<i64> {
		let seconds = match self {
			SessionZone::Local => {
				let utc = DateTime::from_timestamp_millis(instant).ok_or(Error::TemporalOutOfRange {
					millis: instant,
				})?;
				Local.offset_from_utc_datetime(&utc.naive_utc()).local_minus_utc()
			}
			SessionZone::Fixed {
				offset_seconds,
			} => *offset_seconds,
		};
		Ok(seconds as i64 * 1000)
	}

	/// The instant whose wall-clock fields in this zone are `local`. On a
	/// daylight saving overlap the earlier instant wins.
	pub fn instant_of(&self, local: NaiveDateTime) -> Result<i64> {
		let out_of_range = || Error::TemporalOutOfRange {
			millis: local.and_utc().timestamp_millis(),
		};
		match self {
			SessionZone::Local => Local
				.from_local_datetime(&local)
				.earliest()
				.map(|dt| dt.timestamp_millis())
				.ok_or_else(out_of_range),
			SessionZone::Fixed {
				offset_seconds,
			} => FixedOffset::east_opt(*offset_seconds)
				.and_then(|offset| offset.from_local_datetime(&local).earliest())
				.map(|dt| dt.timestamp_millis())
				.ok_or_else(out_of_range),
		}
	}
}

/// Shift `instant` so that its wall-clock fields in `zone` read the same in
/// UTC.
pub fn keep_local_as_utc(instant: i64, zone: &SessionZone) -> Result<i64> {
	let offset = zone.offset_millis_at(instant)?;
	instant.checked_add(offset).ok_or(Error::TemporalOutOfRange {
		millis: instant,
	})
}

/// Days since the epoch of a local-midnight instant.
pub fn epoch_days(instant: i64, zone: &SessionZone) -> Result<i64> {
	Ok(keep_local_as_utc(instant, zone)?.div_euclid(MILLIS_PER_DAY))
}

/// Milliseconds since UTC midnight of a local time-of-day instant.
pub fn millis_of_day(instant: i64, zone: &SessionZone) -> Result<i64> {
	Ok(keep_local_as_utc(instant, zone)?.rem_euclid(MILLIS_PER_DAY))
}

#[cfg(test)]
mod tests {
	use chrono::NaiveDate;

	use super::*;

	fn local(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
		NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(hh, mm, ss).unwrap()
	}

	#[test]
	fn test_epoch_days_is_zone_independent() {
		for offset in [-12 * 3600, -5 * 3600, 0, 3600, 5 * 3600 + 1800, 14 * 3600] {
			let zone = SessionZone::fixed(offset);
			let instant = zone.instant_of(local(2024, 3, 1, 0, 0, 0)).unwrap();
			assert_eq!(epoch_days(instant, &zone).unwrap(), 19783, "offset {}", offset);
		}
	}

	#[test]
	fn test_epoch_days_in_process_zone() {
		let zone = SessionZone::Local;
		let instant = zone.instant_of(local(2024, 3, 1, 0, 0, 0)).unwrap();
		assert_eq!(epoch_days(instant, &zone).unwrap(), 19783);
	}

	#[test]
	fn test_epoch_days_before_epoch() {
		let zone = SessionZone::fixed(-8 * 3600);
		let instant = zone.instant_of(local(1969, 12, 31, 0, 0, 0)).unwrap();
		assert_eq!(epoch_days(instant, &zone).unwrap(), -1);
	}

	#[test]
	fn test_millis_of_day() {
		for offset in [-7 * 3600, 0, 2 * 3600, 9 * 3600] {
			let zone = SessionZone::fixed(offset);
			let instant = zone.instant_of(local(1970, 1, 1, 13, 45, 30)).unwrap();
			assert_eq!(millis_of_day(instant, &zone).unwrap(), 49_530_000, "offset {}", offset);
		}
	}

	#[test]
	fn test_millis_of_day_in_process_zone() {
		let zone = SessionZone::Local;
		let instant = zone.instant_of(local(2020, 6, 15, 13, 45, 30)).unwrap();
		assert_eq!(millis_of_day(instant, &zone).unwrap(), 49_530_000);
	}

	#[test]
	fn test_utc_keeps_instant() {
		assert_eq!(keep_local_as_utc(123_456, &SessionZone::utc()).unwrap(), 123_456);
	}

	#[test]
	fn test_out_of_range_instant() {
		assert!(matches!(
			SessionZone::Local.offset_millis_at(i64::MAX),
			Err(Error::TemporalOutOfRange { .. })
		));
	}
}
