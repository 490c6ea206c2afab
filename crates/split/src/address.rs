// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Display, Formatter},
	str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// A host, optionally with a port, that a split prefers to be read from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HostAddress {
	host: String,
	port: Option<u16>,
}

impl HostAddress {
	pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
		Self {
			host: host.into(),
			port,
		}
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn port(&self) -> Option<u16> {
		self.port
	}
}

impl FromStr for HostAddress {
	type Err = String;

	/// Accepts `host`, `host:port`, `[v6]` and `[v6]:port`.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		if s.is_empty() {
			return Err("empty host address".to_string());
		}

		let (host, port) = if let Some(rest) = s.strip_prefix('[') {
			let (host, tail) = rest.split_once(']').ok_or_else(|| format!("unterminated bracket in '{}'", s))?;
			let port = match tail {
				"" => None,
				tail => Some(tail.strip_prefix(':').ok_or_else(|| format!("unexpected '{}' after host", tail))?),
			};
			(host, port)
		} else if s.matches(':').count() > 1 {
			// bare IPv6 literal without a port
			(s, None)
		} else {
			match s.split_once(':') {
				Some((host, port)) => (host, Some(port)),
				None => (s, None),
			}
		};

		if host.is_empty() {
			return Err(format!("missing host in '{}'", s));
		}
		let port = port.map(|p| p.parse::<u16>().map_err(|_| format!("invalid port '{}'", p))).transpose()?;

		Ok(HostAddress::new(host, port))
	}
}

impl Display for HostAddress {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let bracket = self.host.contains(':');
		match (bracket, self.port) {
			(true, Some(port)) => write!(f, "[{}]:{}", self.host, port),
			(true, None) => write!(f, "[{}]", self.host),
			(false, Some(port)) => write!(f, "{}:{}", self.host, port),
			(false, None) => f.write_str(&self.host),
		}
	}
}

impl Serialize for HostAddress {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.collect_str(self)
	}
}

impl<'de> Deserialize<'de> for HostAddress {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(de::Error::custom)
	}
}
