// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_split::{Predicate, SplitDescriptor};
use conduit_type::{ColumnHandle, Result, TableName};
use tracing::{debug, instrument};

use crate::Driver;

/// One split per fragment of the scan the driver plans for `table`.
#[instrument(name = "cursor::plan_splits", level = "debug", skip_all, fields(table = %table))]
pub fn plan_splits<D: Driver>(
	driver: &D,
	table: &TableName,
	predicate: &Predicate,
	columns: &[ColumnHandle],
) -> Result<Vec<SplitDescriptor>> {
	let fragments = driver.fragments(table, predicate, columns)?;
	debug!(fragments = fragments.len(), "planned scan");
	fragments.into_iter().map(|fragment| SplitDescriptor::new(table.clone(), predicate.clone(), fragment)).collect()
}
