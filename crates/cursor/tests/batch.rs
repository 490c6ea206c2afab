// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_column::Cell;
use conduit_cursor::{CursorConfig, memory::MemoryDriver, open_batch_cursor, plan_splits};
use conduit_split::{KeyRange, Predicate, ScanFragment, SplitDescriptor};
use conduit_type::{ColumnHandle, DriverValue, Error, ErrorKind, SessionZone, TableName, Type};

fn lineitem() -> TableName {
	TableName::new(Some("tpch"), "lineitem")
}

fn columns() -> Vec<ColumnHandle> {
	vec![ColumnHandle::new("orderkey", Type::BigInt), ColumnHandle::new("comment", Type::varchar())]
}

fn driver(rows: usize) -> MemoryDriver {
	let driver = MemoryDriver::new();
	driver.create_table(&lineitem(), columns());
	for i in 0..rows {
		let key = format!("{:08}", i).into_bytes();
		let comment = if i % 2 == 0 {
			DriverValue::from("even")
		} else {
			DriverValue::Null
		};
		driver.insert(&lineitem(), key, vec![DriverValue::Long(i as i64), comment]).unwrap();
	}
	driver
}

fn single_split(driver: &MemoryDriver) -> SplitDescriptor {
	plan_splits(driver, &lineitem(), &Predicate::all(), &columns()).unwrap().remove(0)
}

fn config(batch_size: usize) -> CursorConfig {
	CursorConfig::default().with_batch_size(batch_size).with_zone(SessionZone::utc())
}

#[test]
fn test_full_page_then_partial_page() {
	let batch_size = 16;
	let driver = driver(batch_size + 3);
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(batch_size)).unwrap();

	let first = cursor.next_page().unwrap().unwrap();
	assert_eq!(first.position_count(), batch_size);
	assert!(!cursor.is_finished());

	let second = cursor.next_page().unwrap().unwrap();
	assert_eq!(second.position_count(), 3);
	assert_eq!(second.row(0), Some(vec![Cell::Long(16), Cell::Slice(b"even".to_vec())]));
	assert_eq!(second.row(1), Some(vec![Cell::Long(17), Cell::Null]));
	assert!(cursor.is_finished());

	assert_eq!(cursor.next_page().unwrap(), None);
	assert_eq!(driver.closed(), 1);
}

#[test]
fn test_exact_batch_emits_no_empty_page() {
	let driver = driver(8);
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(8)).unwrap();

	assert_eq!(cursor.next_page().unwrap().map(|p| p.position_count()), Some(8));
	assert!(!cursor.is_finished());
	assert_eq!(cursor.next_page().unwrap(), None);
	assert!(cursor.is_finished());
}

#[test]
fn test_empty_fragment_finishes_without_pages() {
	let driver = driver(0);
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(8)).unwrap();
	assert_eq!(cursor.next_page().unwrap(), None);
	assert!(cursor.is_finished());
}

#[test]
fn test_page_bounded_by_bytes() {
	let table = TableName::new(None, "blobs");
	let columns = vec![ColumnHandle::new("payload", Type::Varbinary)];
	let driver = MemoryDriver::new();
	driver.create_table(&table, columns.clone());
	for i in 0..7u8 {
		driver.insert(&table, vec![i], vec![DriverValue::Bytes(vec![i; 100])]).unwrap();
	}
	let split = plan_splits(&driver, &table, &Predicate::all(), &columns).unwrap().remove(0);
	let config = config(1000).with_max_page_bytes(250);
	let mut cursor = open_batch_cursor(&driver, &split, &columns, &config).unwrap();

	let mut counts = Vec::new();
	while !cursor.is_finished() {
		if let Some(page) = cursor.next_page().unwrap() {
			counts.push(page.position_count());
		}
	}
	assert_eq!(counts, vec![3, 3, 1]);
	assert_eq!(cursor.memory_usage(), 0);
}

#[test]
fn test_accounting() {
	let driver = driver(5);
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(64)).unwrap();
	assert_eq!(cursor.read_time(), std::time::Duration::ZERO);

	cursor.next_page().unwrap().unwrap();
	assert!(cursor.is_finished());
	// three "even" comments of 4 bytes and five 8 byte keys
	assert_eq!(cursor.completed_bytes(), 5 * 8 + 3 * 4);

	let frozen = cursor.read_time();
	assert_eq!(cursor.read_time(), frozen);
}

#[test]
fn test_close_is_idempotent() {
	let driver = driver(100);
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(8)).unwrap();
	cursor.next_page().unwrap().unwrap();

	cursor.close().unwrap();
	cursor.close().unwrap();
	assert_eq!(driver.closed(), 1);
	assert!(cursor.is_finished());
	assert_eq!(cursor.next_page().unwrap(), None);

	drop(cursor);
	assert_eq!(driver.closed(), 1);
}

#[test]
fn test_drop_closes_open_scan() {
	let driver = driver(100);
	let split = single_split(&driver);
	let cursor = open_batch_cursor(&driver, &split, &columns(), &config(8)).unwrap();
	drop(cursor);
	assert_eq!(driver.opened(), 1);
	assert_eq!(driver.closed(), 1);
}

#[test]
fn test_driver_failure_closes_once_and_keeps_cause() {
	let driver = driver(100);
	driver.fail_scan_after(5);
	driver.fail_on_close();
	let split = single_split(&driver);
	let mut cursor = open_batch_cursor(&driver, &split, &columns(), &config(8)).unwrap();

	let err = cursor.next_page().unwrap_err();
	assert_eq!(err.kind(), ErrorKind::Adapter);
	assert!(matches!(err.primary(), Error::Driver { source } if source.message().contains("injected scan failure")));
	assert_eq!(err.suppressed().len(), 1);
	assert_eq!(err.suppressed()[0].message(), "injected close failure");
	assert_eq!(driver.closed(), 1);

	// rows buffered before the failure are dropped
	assert_eq!(cursor.next_page().unwrap(), None);
	assert!(cursor.is_finished());
	drop(cursor);
	assert_eq!(driver.closed(), 1);
}

#[test]
fn test_wrong_class_value_reads_as_null() {
	let table = TableName::new(None, "mismatch");
	let columns = vec![ColumnHandle::new("n", Type::BigInt), ColumnHandle::new("flag", Type::Boolean)];
	let driver = MemoryDriver::new();
	driver.create_table(&table, columns.clone());
	driver.insert(&table, b"a".to_vec(), vec![DriverValue::from("not a number"), DriverValue::Long(1)]).unwrap();
	driver.insert(&table, b"b".to_vec(), vec![DriverValue::Long(2), DriverValue::Boolean(true)]).unwrap();
	let split = plan_splits(&driver, &table, &Predicate::all(), &columns).unwrap().remove(0);
	let mut cursor = open_batch_cursor(&driver, &split, &columns, &config(8)).unwrap();

	let page = cursor.next_page().unwrap().unwrap();
	assert_eq!(page.row(0), Some(vec![Cell::Null, Cell::Null]));
	assert_eq!(page.row(1), Some(vec![Cell::Long(2), Cell::Boolean(true)]));
	assert!(cursor.is_finished());
	assert_eq!(driver.closed(), 1);
}

#[test]
fn test_decimal_overflow_is_fatal() {
	let table = TableName::new(None, "prices");
	let columns = vec![ColumnHandle::new("price", Type::decimal(5, 2).unwrap())];
	let driver = MemoryDriver::new();
	driver.create_table(&table, columns.clone());
	driver.insert(&table, b"a".to_vec(), vec![DriverValue::Long(12)]).unwrap();
	driver.insert(&table, b"b".to_vec(), vec![DriverValue::Long(1000)]).unwrap();
	let split = plan_splits(&driver, &table, &Predicate::all(), &columns).unwrap().remove(0);
	let mut cursor = open_batch_cursor(&driver, &split, &columns, &config(8)).unwrap();

	let err = cursor.next_page().unwrap_err();
	assert!(matches!(err, Error::DecimalOverflow { .. }));
	assert_eq!(err.kind(), ErrorKind::Adapter);
	assert!(err.suppressed().is_empty());
	assert_eq!(driver.closed(), 1);
	assert_eq!(cursor.next_page().unwrap(), None);
}

#[test]
fn test_corrupted_token_fails_at_open() {
	let driver = driver(3);
	let split = single_split(&driver);

	let mut json = serde_json::to_value(&split).unwrap();
	json["opaqueScanToken"] = serde_json::Value::String("%%%".to_string());
	let damaged: SplitDescriptor = serde_json::from_value(json).unwrap();

	let err = open_batch_cursor(&driver, &damaged, &columns(), &config(8)).err().unwrap();
	assert!(matches!(err, Error::MissingFragment { .. }));
	assert_eq!(driver.opened(), 0);
}

#[test]
fn test_foreign_fragment_is_not_found() {
	let driver = driver(3);
	let other = TableName::new(Some("tpch"), "orders");
	driver.create_table(&other, columns());

	let foreign = ScanFragment::new(other, KeyRange::default());
	let split = SplitDescriptor::new(lineitem(), Predicate::all(), foreign).unwrap();
	let err = open_batch_cursor(&driver, &split, &columns(), &config(8)).err().unwrap();
	assert!(matches!(err, Error::FragmentNotFound { .. }));

	let unplanned = ScanFragment::new(lineitem(), KeyRange::new(b"x".to_vec(), b"y".to_vec()));
	let split = SplitDescriptor::new(lineitem(), Predicate::all(), unplanned).unwrap();
	let err = open_batch_cursor(&driver, &split, &columns(), &config(8)).err().unwrap();
	assert!(matches!(err, Error::FragmentNotFound { .. }));
	assert_eq!(driver.opened(), 0);
}

#[test]
fn test_every_planned_split_reads_its_region() {
	let driver = driver(30);
	driver.add_region(&lineitem(), KeyRange::new(Vec::new(), b"00000010".to_vec()), "rs-1:16020").unwrap();
	driver.add_region(&lineitem(), KeyRange::new(b"00000010".to_vec(), Vec::new()), "rs-2:16020").unwrap();

	let splits = plan_splits(&driver, &lineitem(), &Predicate::all(), &columns()).unwrap();
	assert_eq!(splits.len(), 2);

	let mut total = 0;
	for split in &splits {
		let received: SplitDescriptor = serde_json::from_str(&serde_json::to_string(split).unwrap()).unwrap();
		let mut cursor = open_batch_cursor(&driver, &received, &columns(), &config(64)).unwrap();
		while let Some(page) = cursor.next_page().unwrap() {
			total += page.position_count();
		}
		assert!(cursor.is_finished());
	}
	assert_eq!(total, 30);
	assert_eq!(driver.closed(), 2);
}
