// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use conduit_column::{Page, PageBuilder};
use conduit_split::SplitDescriptor;
use conduit_type::{ColumnHandle, Result};
use tracing::{instrument, trace};

use crate::{CursorConfig, Driver, DriverCursor, source::ScanSource};

/// Open a columnar cursor over one split.
pub fn open_batch_cursor<D: Driver>(
	driver: &D,
	split: &SplitDescriptor,
	columns: &[ColumnHandle],
	config: &CursorConfig,
) -> Result<BatchCursor<D::Cursor>> {
	let source = crate::source::open_source(driver, split, columns, config.zone)?;
	let types = columns.iter().map(|c| c.r#type.clone()).collect();
	Ok(BatchCursor {
		source,
		builder: PageBuilder::new(types, config.batch_size, config.max_page_bytes),
		batch_size: config.batch_size.max(1),
	})
}

/// Pulls rows from the driver and hands them out as pages.
///
/// A page is only emitted once the builder is full or the scan is exhausted,
/// so every page but the last holds a full batch. An exhausted scan closes
/// itself; the cursor is finished once it is closed and the last partial page
/// has been handed out.
pub struct BatchCursor<C: DriverCursor> {
	source: ScanSource<C>,
	builder: PageBuilder,
	batch_size: usize,
}

impl<C: DriverCursor> BatchCursor<C> {
	pub fn columns(&self) -> &[ColumnHandle] {
		self.source.columns()
	}

	#[instrument(name = "cursor::batch::next_page", level = "trace", skip(self))]
	pub fn next_page(&mut self) -> Result<Option<Page>> {
		if let Err(err) = self.fill() {
			self.builder.reset();
			return Err(err);
		}

		let ready = self.builder.is_full() || self.source.is_closed();
		if self.builder.is_empty() || !ready {
			return Ok(None);
		}

		let page = self.builder.build();
		trace!(positions = page.position_count(), bytes = page.size_in_bytes(), "page ready");
		Ok(Some(page))
	}

	fn fill(&mut self) -> Result<()> {
		if self.source.is_closed() {
			return Ok(());
		}
		for _ in 0..self.batch_size {
			if self.builder.is_full() || !self.source.advance()? {
				break;
			}
			let mut row = Vec::with_capacity(self.source.width());
			for field in 0..self.source.width() {
				row.push(self.source.cell(field)?);
			}
			if let Err(err) = self.builder.append_row(row) {
				return Err(self.source.fail(err));
			}
		}
		Ok(())
	}

	/// Closed and nothing left to hand out.
	pub fn is_finished(&self) -> bool {
		self.source.is_closed() && self.builder.is_empty()
	}

	pub fn completed_bytes(&self) -> u64 {
		self.source.completed_bytes()
	}

	pub fn read_time(&self) -> Duration {
		self.source.read_time()
	}

	/// Bytes retained by the page under construction.
	pub fn memory_usage(&self) -> usize {
		self.builder.size_in_bytes()
	}

	/// Release the driver cursor. Rows already buffered are still handed out
	/// by the next call to [`BatchCursor::next_page`].
	pub fn close(&mut self) -> Result<()> {
		self.source.close()
	}
}
