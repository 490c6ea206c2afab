// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Debug, Formatter};

use conduit_type::{Error, Result};
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

/// Compensation for a write that has started but not finished.
pub type RollbackAction = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Tracks at most one pending write and the action that undoes it.
///
/// The coordinator is either idle or holds exactly one [`RollbackAction`].
/// The lock only guards taking and installing the action; an action always
/// runs after the lock is released, so it may call back into the metadata
/// layer. Whichever of [`finish`](Self::finish) and
/// [`rollback`](Self::rollback) takes the action first wins, which bounds
/// every action to at most one run.
#[derive(Default)]
pub struct WriteCoordinator {
	pending: Mutex<Option<RollbackAction>>,
}

impl WriteCoordinator {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_pending(&self) -> bool {
		self.pending.lock().is_some()
	}

	/// Fails with [`Error::WriteInProgress`] while a write is pending.
	pub fn ensure_idle(&self) -> Result<()> {
		if self.is_pending() {
			return Err(Error::WriteInProgress);
		}
		Ok(())
	}

	/// Register the compensation for a write that just started. When another
	/// write is pending the new action is dropped, not stored.
	#[instrument(name = "transaction::begin_write", level = "debug", skip_all)]
	pub fn begin_write<F>(&self, action: F) -> Result<()>
	where
		F: FnOnce() -> Result<()> + Send + 'static,
	{
		let mut pending = self.pending.lock();
		if pending.is_some() {
			return Err(Error::WriteInProgress);
		}
		*pending = Some(Box::new(action));
		debug!("write pending");
		Ok(())
	}

	/// The pending write completed; forget its compensation. Returns whether
	/// a write was pending.
	#[instrument(name = "transaction::finish", level = "debug", skip_all)]
	pub fn finish(&self) -> bool {
		let action = self.pending.lock().take();
		debug!(pending = action.is_some(), "write finished");
		action.is_some()
	}

	/// Undo the pending write, if any. The action's own failure is returned
	/// and the coordinator is idle afterwards either way.
	#[instrument(name = "transaction::rollback", level = "debug", skip_all)]
	pub fn rollback(&self) -> Result<()> {
		let Some(action) = self.pending.lock().take() else {
			return Ok(());
		};
		match action() {
			Ok(()) => {
				debug!("rollback executed");
				Ok(())
			}
			Err(err) => {
				warn!(error = %err, "rollback action failed");
				Err(err)
			}
		}
	}
}

impl Debug for WriteCoordinator {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("WriteCoordinator").field("pending", &self.is_pending()).finish()
	}
}
