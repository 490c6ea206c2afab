// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use conduit_type::{Error, Lane, Result, Type};

use crate::Cell;

/// The buffers of one column. Every variant keeps a `defined` flag per
/// position; `false` marks a null whose value slot holds a default.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
	Boolean {
		values: Vec<bool>,
		defined: Vec<bool>,
	},
	Long {
		values: Vec<i64>,
		defined: Vec<bool>,
	},
	Double {
		values: Vec<f64>,
		defined: Vec<bool>,
	},
	Slice {
		offsets: Vec<usize>,
		bytes: Vec<u8>,
		defined: Vec<bool>,
	},
	Block {
		offsets: Vec<usize>,
		elements: Box<ColumnData>,
		defined: Vec<bool>,
	},
}

impl ColumnData {
	pub fn new(r#type: &Type) -> Self {
		Self::with_capacity(r#type, 0)
	}

	pub fn with_capacity(r#type: &Type, capacity: usize) -> Self {
		let defined = Vec::with_capacity(capacity);
		match r#type.lane() {
			Lane::Boolean => ColumnData::Boolean {
				values: Vec::with_capacity(capacity),
				defined,
			},
			Lane::Long => ColumnData::Long {
				values: Vec::with_capacity(capacity),
				defined,
			},
			Lane::Double => ColumnData::Double {
				values: Vec::with_capacity(capacity),
				defined,
			},
			Lane::Slice => ColumnData::Slice {
				offsets: vec![0],
				bytes: Vec::new(),
				defined,
			},
			Lane::Block => {
				// element types are never absent for the block lane
				let element = r#type.element_type().cloned().unwrap_or(Type::Boolean);
				ColumnData::Block {
					offsets: vec![0],
					elements: Box::new(ColumnData::new(&element)),
					defined,
				}
			}
		}
	}

	pub fn len(&self) -> usize {
		self.defined().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn defined(&self) -> &Vec<bool> {
		match self {
			ColumnData::Boolean {
				defined,
				..
			}
			| ColumnData::Long {
				defined,
				..
			}
			| ColumnData::Double {
				defined,
				..
			}
			| ColumnData::Slice {
				defined,
				..
			}
			| ColumnData::Block {
				defined,
				..
			} => defined,
		}
	}

	pub fn is_null(&self, index: usize) -> bool {
		!self.defined().get(index).copied().unwrap_or(false)
	}

	/// Append one cell. `target` only feeds the error when the cell does not
	/// belong to this column's lane.
	pub fn push(&mut self, cell: Cell, target: &Type) -> Result<()> {
		match (self, cell) {
			(ColumnData::Boolean {
				values,
				defined,
			}, Cell::Boolean(v)) => {
				values.push(v);
				defined.push(true);
			}
			(ColumnData::Long {
				values,
				defined,
			}, Cell::Long(v)) => {
				values.push(v);
				defined.push(true);
			}
			(ColumnData::Double {
				values,
				defined,
			}, Cell::Double(v)) => {
				values.push(v);
				defined.push(true);
			}
			(ColumnData::Slice {
				offsets,
				bytes,
				defined,
			}, Cell::Slice(v)) => {
				bytes.extend_from_slice(&v);
				offsets.push(bytes.len());
				defined.push(true);
			}
			(ColumnData::Block {
				offsets,
				elements,
				defined,
			}, Cell::Block(cells)) => {
				let element = target.element_type().cloned().unwrap_or(Type::Boolean);
				let start = elements.len();
				for cell in cells {
					if let Err(err) = elements.push(cell, &element) {
						elements.truncate(start);
						return Err(err);
					}
				}
				offsets.push(elements.len());
				defined.push(true);
			}
			(data, Cell::Null) => data.push_null(),
			(_, cell) => {
				return Err(Error::CellMismatch {
					cell: cell.name(),
					target: target.clone(),
				});
			}
		}
		Ok(())
	}

	pub fn push_null(&mut self) {
		match self {
			ColumnData::Boolean {
				values,
				defined,
			} => {
				values.push(false);
				defined.push(false);
			}
			ColumnData::Long {
				values,
				defined,
			} => {
				values.push(0);
				defined.push(false);
			}
			ColumnData::Double {
				values,
				defined,
			} => {
				values.push(0.0);
				defined.push(false);
			}
			ColumnData::Slice {
				offsets,
				bytes,
				defined,
			} => {
				offsets.push(bytes.len());
				defined.push(false);
			}
			ColumnData::Block {
				offsets,
				elements,
				defined,
			} => {
				offsets.push(elements.len());
				defined.push(false);
			}
		}
	}

	/// Read the cell at `index` back, `None` when out of bounds.
	pub fn get(&self, index: usize) -> Option<Cell> {
		if index >= self.len() {
			return None;
		}
		if self.is_null(index) {
			return Some(Cell::Null);
		}
		let cell = match self {
			ColumnData::Boolean {
				values,
				..
			} => Cell::Boolean(values[index]),
			ColumnData::Long {
				values,
				..
			} => Cell::Long(values[index]),
			ColumnData::Double {
				values,
				..
			} => Cell::Double(values[index]),
			ColumnData::Slice {
				offsets,
				bytes,
				..
			} => Cell::Slice(bytes[offsets[index]..offsets[index + 1]].to_vec()),
			ColumnData::Block {
				offsets,
				elements,
				..
			} => Cell::Block((offsets[index]..offsets[index + 1]).filter_map(|i| elements.get(i)).collect()),
		};
		Some(cell)
	}

	/// Bytes held by the buffers, used for page memory accounting.
	pub fn size_in_bytes(&self) -> usize {
		let defined = self.len();
		match self {
			ColumnData::Boolean {
				values,
				..
			} => defined + values.len(),
			ColumnData::Long {
				values,
				..
			} => defined + values.len() * size_of::<i64>(),
			ColumnData::Double {
				values,
				..
			} => defined + values.len() * size_of::<f64>(),
			ColumnData::Slice {
				bytes,
				..
			} => defined + defined * size_of::<usize>() + bytes.len(),
			ColumnData::Block {
				elements,
				..
			} => defined + defined * size_of::<usize>() + elements.size_in_bytes(),
		}
	}

	/// Drop every position from `len` on.
	pub fn truncate(&mut self, len: usize) {
		if len >= self.len() {
			return;
		}
		match self {
			ColumnData::Boolean {
				values,
				defined,
			} => {
				values.truncate(len);
				defined.truncate(len);
			}
			ColumnData::Long {
				values,
				defined,
			} => {
				values.truncate(len);
				defined.truncate(len);
			}
			ColumnData::Double {
				values,
				defined,
			} => {
				values.truncate(len);
				defined.truncate(len);
			}
			ColumnData::Slice {
				offsets,
				bytes,
				defined,
			} => {
				offsets.truncate(len + 1);
				bytes.truncate(offsets[len]);
				defined.truncate(len);
			}
			ColumnData::Block {
				offsets,
				elements,
				defined,
			} => {
				offsets.truncate(len + 1);
				elements.truncate(offsets[len]);
				defined.truncate(len);
			}
		}
	}

	pub fn clear(&mut self) {
		match self {
			ColumnData::Boolean {
				values,
				defined,
			} => {
				values.clear();
				defined.clear();
			}
			ColumnData::Long {
				values,
				defined,
			} => {
				values.clear();
				defined.clear();
			}
			ColumnData::Double {
				values,
				defined,
			} => {
				values.clear();
				defined.clear();
			}
			ColumnData::Slice {
				offsets,
				bytes,
				defined,
			} => {
				offsets.truncate(1);
				bytes.clear();
				defined.clear();
			}
			ColumnData::Block {
				offsets,
				elements,
				defined,
			} => {
				offsets.truncate(1);
				elements.clear();
				defined.clear();
			}
		}
	}
}
