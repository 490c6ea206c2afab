// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

/// Configuration for the metadata layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
	/// Whether `DROP TABLE` may reach the store.
	pub allow_drop_table: bool,
}

impl MetadataConfig {
	pub fn with_allow_drop_table(mut self, allow: bool) -> Self {
		self.allow_drop_table = allow;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_drop_disabled_by_default() {
		assert!(!MetadataConfig::default().allow_drop_table);
		let config: MetadataConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, MetadataConfig::default());
		let config: MetadataConfig = serde_json::from_str(r#"{"allow_drop_table": true}"#).unwrap();
		assert!(config.allow_drop_table);
	}
}
