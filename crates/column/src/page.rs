// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use conduit_type::{Error, Result, Type};

use crate::{Cell, ColumnData};

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
	pub r#type: Type,
	pub data: ColumnData,
}

impl Deref for Column {
	type Target = ColumnData;

	fn deref(&self) -> &Self::Target {
		&self.data
	}
}

/// A columnar batch: one column per projected field, all with the same
/// position count.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
	position_count: usize,
	columns: Vec<Column>,
}

impl Page {
	pub fn position_count(&self) -> usize {
		self.position_count
	}

	pub fn columns(&self) -> &[Column] {
		&self.columns
	}

	pub fn column(&self, index: usize) -> Option<&Column> {
		self.columns.get(index)
	}

	/// The cells of one position across all columns.
	pub fn row(&self, position: usize) -> Option<Vec<Cell>> {
		if position >= self.position_count {
			return None;
		}
		self.columns.iter().map(|c| c.data.get(position)).collect()
	}

	pub fn size_in_bytes(&self) -> usize {
		self.columns.iter().map(|c| c.data.size_in_bytes()).sum()
	}
}

impl Index<usize> for Page {
	type Output = Column;

	fn index(&self, index: usize) -> &Self::Output {
		self.columns.index(index)
	}
}

/// Accumulates rows into column buffers until a page is due.
///
/// The builder is full once it holds `max_positions` rows or its buffers
/// exceed `max_bytes`, whichever comes first.
#[derive(Debug)]
pub struct PageBuilder {
	types: Vec<Type>,
	columns: Vec<ColumnData>,
	positions: usize,
	max_positions: usize,
	max_bytes: usize,
}

impl PageBuilder {
	pub fn new(types: Vec<Type>, max_positions: usize, max_bytes: usize) -> Self {
		let columns = types.iter().map(|t| ColumnData::with_capacity(t, max_positions)).collect();
		Self {
			types,
			columns,
			positions: 0,
			max_positions: max_positions.max(1),
			max_bytes,
		}
	}

	pub fn types(&self) -> &[Type] {
		&self.types
	}

	pub fn position_count(&self) -> usize {
		self.positions
	}

	pub fn is_empty(&self) -> bool {
		self.positions == 0
	}

	pub fn is_full(&self) -> bool {
		self.positions >= self.max_positions || self.size_in_bytes() >= self.max_bytes
	}

	pub fn size_in_bytes(&self) -> usize {
		self.columns.iter().map(ColumnData::size_in_bytes).sum()
	}

	/// Append one complete row. Width and lanes, nested elements included,
	/// are checked before any buffer is touched.
	pub fn append_row(&mut self, cells: Vec<Cell>) -> Result<()> {
		if cells.len() != self.types.len() {
			return Err(Error::InvalidField {
				field: cells.len(),
				width: self.types.len(),
			});
		}
		for (cell, r#type) in cells.iter().zip(&self.types) {
			check_lane(cell, r#type)?;
		}
		for ((cell, column), r#type) in cells.into_iter().zip(self.columns.iter_mut()).zip(&self.types) {
			column.push(cell, r#type)?;
		}
		self.positions += 1;
		Ok(())
	}

	/// Hand out the buffered rows as a page and start over.
	pub fn build(&mut self) -> Page {
		let columns = self
			.types
			.iter()
			.zip(self.columns.iter_mut())
			.map(|(r#type, data)| Column {
				r#type: r#type.clone(),
				data: std::mem::replace(data, ColumnData::with_capacity(r#type, 0)),
			})
			.collect();
		let page = Page {
			position_count: self.positions,
			columns,
		};
		self.reset();
		page
	}

	pub fn reset(&mut self) {
		for column in &mut self.columns {
			column.clear();
		}
		self.positions = 0;
	}
}

fn check_lane(cell: &Cell, r#type: &Type) -> Result<()> {
	let Some(lane) = cell.lane() else {
		return Ok(());
	};
	if lane != r#type.lane() {
		return Err(Error::CellMismatch {
			cell: cell.name(),
			target: r#type.clone(),
		});
	}
	if let (Cell::Block(elements), Some(element)) = (cell, r#type.element_type()) {
		for cell in elements {
			check_lane(cell, element)?;
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn builder(max_positions: usize) -> PageBuilder {
		PageBuilder::new(vec![Type::BigInt, Type::varchar()], max_positions, 1024 * 1024)
	}

	#[test]
	fn test_full_by_positions() {
		let mut builder = builder(2);
		assert!(builder.is_empty());
		builder.append_row(vec![Cell::Long(1), Cell::Slice(b"a".to_vec())]).unwrap();
		assert!(!builder.is_full());
		builder.append_row(vec![Cell::Null, Cell::Null]).unwrap();
		assert!(builder.is_full());

		let page = builder.build();
		assert_eq!(page.position_count(), 2);
		assert_eq!(page.row(0), Some(vec![Cell::Long(1), Cell::Slice(b"a".to_vec())]));
		assert_eq!(page.row(1), Some(vec![Cell::Null, Cell::Null]));
		assert_eq!(page.row(2), None);
		assert_eq!(page[0].r#type, Type::BigInt);
		assert!(builder.is_empty());
		assert!(!builder.is_full());
	}

	#[test]
	fn test_full_by_bytes() {
		let mut builder = PageBuilder::new(vec![Type::Varbinary], 1000, 64);
		builder.append_row(vec![Cell::Slice(vec![0u8; 100])]).unwrap();
		assert!(builder.is_full());
	}

	#[test]
	fn test_rejected_row_leaves_builder_untouched() {
		let mut builder = builder(4);
		assert!(builder.append_row(vec![Cell::Long(1), Cell::Long(2)]).is_err());
		assert!(builder.append_row(vec![Cell::Long(1)]).is_err());
		assert!(builder.is_empty());
		assert_eq!(builder.build().position_count(), 0);
	}

	#[test]
	fn test_rejected_nested_element_leaves_builder_untouched() {
		let mut builder = PageBuilder::new(vec![Type::BigInt, Type::array(Type::BigInt)], 4, 1024);
		let bad = vec![Cell::Long(9), Cell::Block(vec![Cell::Long(1), Cell::Double(2.0)])];
		assert!(matches!(builder.append_row(bad), Err(Error::CellMismatch { cell: "double", .. })));
		assert!(builder.is_empty());
		assert_eq!(builder.size_in_bytes(), 0);

		builder.append_row(vec![Cell::Long(10), Cell::Block(vec![Cell::Long(5)])]).unwrap();
		let page = builder.build();
		assert_eq!(page.position_count(), 1);
		assert_eq!(page.row(0), Some(vec![Cell::Long(10), Cell::Block(vec![Cell::Long(5)])]));
	}

	#[test]
	fn test_build_twice() {
		let mut builder = builder(4);
		builder.append_row(vec![Cell::Long(1), Cell::Null]).unwrap();
		let first = builder.build();
		builder.append_row(vec![Cell::Long(2), Cell::Null]).unwrap();
		let second = builder.build();
		assert_eq!(first.row(0).unwrap()[0], Cell::Long(1));
		assert_eq!(second.row(0).unwrap()[0], Cell::Long(2));
		assert_eq!(second.position_count(), 1);
	}
}
