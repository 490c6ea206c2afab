// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::str::FromStr;

use bigdecimal::BigDecimal;
use conduit_column::Cell;
use conduit_cursor::{CursorConfig, memory::MemoryDriver, open_row_cursor, plan_splits};
use conduit_split::Predicate;
use conduit_type::{ColumnHandle, DriverValue, Error, ErrorKind, SessionZone, TableName, Type};

const MARCH_FIRST_2024_UTC: i64 = 19_783 * 86_400_000;

fn products() -> TableName {
	TableName::new(Some("shop"), "products")
}

fn columns() -> Vec<ColumnHandle> {
	vec![
		ColumnHandle::new("id", Type::BigInt),
		ColumnHandle::new("price", Type::decimal(10, 2).unwrap()),
		ColumnHandle::new("tags", Type::array(Type::varchar())),
		ColumnHandle::new("active", Type::Boolean),
		ColumnHandle::new("score", Type::Double),
		ColumnHandle::new("listed", Type::Date),
	]
}

fn driver() -> MemoryDriver {
	let driver = MemoryDriver::new();
	driver.create_table(&products(), columns());
	driver
		.insert(
			&products(),
			b"p1".to_vec(),
			vec![
				DriverValue::Long(1),
				DriverValue::Decimal(BigDecimal::from_str("12.345").unwrap()),
				DriverValue::Array(vec![DriverValue::from("new"), DriverValue::Null]),
				DriverValue::Boolean(true),
				DriverValue::Double(4.5),
				DriverValue::Date(MARCH_FIRST_2024_UTC),
			],
		)
		.unwrap();
	driver
		.insert(
			&products(),
			b"p2".to_vec(),
			vec![
				DriverValue::Long(2),
				DriverValue::Null,
				DriverValue::from("not an array"),
				DriverValue::Null,
				DriverValue::Null,
				DriverValue::Null,
			],
		)
		.unwrap();
	driver
}

fn open(driver: &MemoryDriver) -> conduit_cursor::RowCursor<conduit_cursor::memory::MemoryCursor> {
	let split = plan_splits(driver, &products(), &Predicate::all(), &columns()).unwrap().remove(0);
	let config = CursorConfig::default().with_zone(SessionZone::utc());
	open_row_cursor(driver, &split, &columns(), &config).unwrap()
}

#[test]
fn test_reads_coerced_values() {
	let driver = driver();
	let mut cursor = open(&driver);

	assert!(cursor.advance().unwrap());
	assert_eq!(cursor.get_long(0).unwrap(), 1);
	assert_eq!(cursor.get_long(1).unwrap(), 1235);
	assert_eq!(cursor.get_object(2).unwrap(), Some(vec![Cell::Slice(b"new".to_vec()), Cell::Null]));
	assert!(cursor.get_boolean(3).unwrap());
	assert_eq!(cursor.get_double(4).unwrap(), 4.5);
	assert_eq!(cursor.get_long(5).unwrap(), 19_783);
	assert!(!cursor.is_null(1).unwrap());
}

#[test]
fn test_nulls_read_as_defaults() {
	let driver = driver();
	let mut cursor = open(&driver);
	cursor.advance().unwrap();
	assert!(cursor.advance().unwrap());

	assert!(cursor.is_null(1).unwrap());
	assert_eq!(cursor.get_long(1).unwrap(), 0);
	assert!(!cursor.get_boolean(3).unwrap());
	assert_eq!(cursor.get_double(4).unwrap(), 0.0);
	assert!(!cursor.is_null(0).unwrap());
}

#[test]
fn test_non_array_value_reads_as_null() {
	let driver = driver();
	let mut cursor = open(&driver);
	cursor.advance().unwrap();
	cursor.advance().unwrap();

	assert_eq!(cursor.get_object(2).unwrap(), None);
	// the driver itself saw a value
	assert!(!cursor.is_null(2).unwrap());
}

#[test]
fn test_contract_violations() {
	let driver = driver();
	let mut cursor = open(&driver);
	cursor.advance().unwrap();

	let err = cursor.get_object(0).unwrap_err();
	assert!(matches!(err, Error::NotAnArray { field: 0, .. }));
	assert_eq!(err.kind(), ErrorKind::Contract);

	assert!(matches!(cursor.get_long(6), Err(Error::InvalidField { field: 6, width: 6 })));
	assert!(matches!(cursor.column_type(6), Err(Error::InvalidField { .. })));
	assert!(matches!(cursor.get_boolean(0), Err(Error::CellMismatch { cell: "long", .. })));

	// none of these end the scan
	assert_eq!(driver.closed(), 0);
	assert_eq!(cursor.get_long(0).unwrap(), 1);
}

#[test]
fn test_column_types() {
	let driver = driver();
	let cursor = open(&driver);
	assert_eq!(cursor.column_type(1).unwrap(), &Type::decimal(10, 2).unwrap());
	assert_eq!(cursor.columns().len(), 6);
}

#[test]
fn test_exhaustion_closes() {
	let driver = driver();
	let mut cursor = open(&driver);
	assert!(cursor.advance().unwrap());
	assert!(cursor.advance().unwrap());
	assert!(!cursor.advance().unwrap());
	assert_eq!(driver.closed(), 1);

	assert!(!cursor.advance().unwrap());
	assert!(matches!(cursor.get_long(0), Err(Error::CursorClosed)));
	assert!(matches!(cursor.is_null(0), Err(Error::CursorClosed)));
	assert!(cursor.completed_bytes() > 0);
}

#[test]
fn test_close_twice() {
	let driver = driver();
	let mut cursor = open(&driver);
	cursor.advance().unwrap();
	cursor.close().unwrap();
	cursor.close().unwrap();
	assert_eq!(driver.closed(), 1);

	let err = cursor.get_double(4).unwrap_err();
	assert!(matches!(err, Error::CursorClosed));
	assert_eq!(err.kind(), ErrorKind::Contract);
}

#[test]
fn test_type_lookups_fail_after_close() {
	let driver = driver();
	let mut cursor = open(&driver);
	assert!(cursor.advance().unwrap());
	cursor.close().unwrap();

	assert!(matches!(cursor.column_type(0), Err(Error::CursorClosed)));
	assert!(matches!(cursor.get_object(0), Err(Error::CursorClosed)));
	assert!(matches!(cursor.get_object(2), Err(Error::CursorClosed)));

	// projection and accounting stay readable for final statistics
	assert_eq!(cursor.columns().len(), 6);
	assert!(cursor.completed_bytes() > 0);
	let frozen = cursor.read_time();
	assert_eq!(cursor.read_time(), frozen);
}

#[test]
fn test_driver_failure_during_advance() {
	let driver = driver();
	driver.fail_scan_after(1);
	let mut cursor = open(&driver);
	assert!(cursor.advance().unwrap());

	let err = cursor.advance().unwrap_err();
	assert!(matches!(err, Error::Driver { .. }));
	assert!(err.suppressed().is_empty());
	assert_eq!(driver.closed(), 1);
	assert!(matches!(cursor.get_long(0), Err(Error::CursorClosed)));
}
