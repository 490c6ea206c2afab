// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use conduit_type::SessionZone;
use serde::Deserialize;

/// Configuration shared by batch and row cursors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
	/// Rows pulled from the driver per `next_page` call, and the page row cap.
	pub batch_size: usize,
	/// A page is emitted once its buffers reach this many bytes.
	pub max_page_bytes: usize,
	/// Zone the driver composed DATE and TIME values in.
	pub zone: SessionZone,
}

impl Default for CursorConfig {
	fn default() -> Self {
		Self {
			batch_size: 4096,
			max_page_bytes: 1024 * 1024,
			zone: SessionZone::Local,
		}
	}
}

impl CursorConfig {
	pub fn with_batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size.max(1);
		self
	}

	pub fn with_max_page_bytes(mut self, max_page_bytes: usize) -> Self {
		self.max_page_bytes = max_page_bytes;
		self
	}

	pub fn with_zone(mut self, zone: SessionZone) -> Self {
		self.zone = zone;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = CursorConfig::default();
		assert_eq!(config.batch_size, 4096);
		assert_eq!(config.max_page_bytes, 1 << 20);
		assert_eq!(config.zone, SessionZone::Local);
	}

	#[test]
	fn test_partial_deserialize() {
		let config: CursorConfig = serde_json::from_str(r#"{"batch_size": 128, "zone": {"fixed": {"offset_seconds": 3600}}}"#).unwrap();
		assert_eq!(config.batch_size, 128);
		assert_eq!(config.max_page_bytes, 1 << 20);
		assert_eq!(config.zone, SessionZone::fixed(3600));
	}
}
