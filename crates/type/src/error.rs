// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	error,
	fmt::{self, Display, Formatter},
};

use crate::Type;

/// Broad classification of an [`Error`], used by callers to decide how a
/// failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
	/// Unrecoverable adapter or driver failure; the read is aborted.
	Adapter,
	/// The API was called out of order, a programming error.
	Contract,
	/// The operation is disabled by configuration.
	Permission,
}

impl Display for ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKind::Adapter => f.write_str("ADAPTER"),
			ErrorKind::Contract => f.write_str("CONTRACT"),
			ErrorKind::Permission => f.write_str("PERMISSION"),
		}
	}
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("decimal value {value} does not fit {target}")]
	DecimalOverflow {
		value: String,
		target: Type,
	},

	#[error("{cell} cell cannot be appended to a {target} column")]
	CellMismatch {
		cell: &'static str,
		target: Type,
	},

	#[error("long decimal must be encoded in 16 bytes, got {len}")]
	InvalidDecimalEncoding {
		len: usize,
	},

	#[error("temporal value {millis}ms is out of range")]
	TemporalOutOfRange {
		millis: i64,
	},

	#[error("invalid decimal type: precision {precision}, scale {scale}")]
	InvalidDecimalType {
		precision: u8,
		scale: u8,
	},

	#[error("driver failure: {source}")]
	Driver {
		source: DriverError,
	},

	/// A failure raised while the cursor was torn down after `primary`.
	#[error("{primary}")]
	Suppressed {
		#[source]
		primary: Box<Error>,
		suppressed: Vec<DriverError>,
	},

	#[error("split for table {table} carries no scan fragment")]
	MissingFragment {
		table: String,
	},

	#[error("scan fragment is not part of table {table}")]
	FragmentNotFound {
		table: String,
	},

	#[error("failed to encode scan fragment: {reason}")]
	InvalidFragment {
		reason: String,
	},

	#[error("table not found: {table}")]
	TableNotFound {
		table: String,
	},

	#[error("target table already exists: {table}")]
	TableExists {
		table: String,
	},

	#[error("cursor is closed")]
	CursorClosed,

	#[error("cannot begin a new write while in an existing one")]
	WriteInProgress,

	#[error("invalid field index {field}, cursor projects {width} columns")]
	InvalidField {
		field: usize,
		width: usize,
	},

	#[error("field {field} must be read before asking whether it was null")]
	NullCheckBeforeRead {
		field: usize,
	},

	#[error("expected field {field} to be a type of array but is {actual}")]
	NotAnArray {
		field: usize,
		actual: Type,
	},

	#[error("{operation} is disabled in this catalog")]
	PermissionDenied {
		operation: String,
	},
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::DecimalOverflow {
				..
			}
			| Error::InvalidDecimalEncoding {
				..
			}
			| Error::TemporalOutOfRange {
				..
			}
			| Error::Driver {
				..
			}
			| Error::MissingFragment {
				..
			}
			| Error::FragmentNotFound {
				..
			}
			| Error::InvalidFragment {
				..
			}
			| Error::TableNotFound {
				..
			}
			| Error::TableExists {
				..
			} => ErrorKind::Adapter,
			Error::Suppressed {
				primary,
				..
			} => primary.kind(),
			Error::InvalidDecimalType {
				..
			}
			| Error::CursorClosed
			| Error::WriteInProgress
			| Error::InvalidField {
				..
			}
			| Error::CellMismatch {
				..
			}
			| Error::NullCheckBeforeRead {
				..
			}
			| Error::NotAnArray {
				..
			} => ErrorKind::Contract,
			Error::PermissionDenied {
				..
			} => ErrorKind::Permission,
		}
	}

	/// The failure that started it all, looking through [`Error::Suppressed`].
	pub fn primary(&self) -> &Error {
		match self {
			Error::Suppressed {
				primary,
				..
			} => primary.primary(),
			other => other,
		}
	}

	/// Close failures recorded while handling this error.
	pub fn suppressed(&self) -> &[DriverError] {
		match self {
			Error::Suppressed {
				suppressed,
				..
			} => suppressed,
			_ => &[],
		}
	}

	/// Attach a close failure without losing the primary cause.
	pub fn with_suppressed(self, failure: DriverError) -> Error {
		match self {
			Error::Suppressed {
				primary,
				mut suppressed,
			} => {
				suppressed.push(failure);
				Error::Suppressed {
					primary,
					suppressed,
				}
			}
			primary => Error::Suppressed {
				primary: Box::new(primary),
				suppressed: vec![failure],
			},
		}
	}
}

impl From<DriverError> for Error {
	fn from(source: DriverError) -> Self {
		Error::Driver {
			source,
		}
	}
}

/// A failure reported by the external driver.
#[derive(Debug)]
pub struct DriverError {
	message: String,
	source: Option<Box<dyn error::Error + Send + Sync + 'static>>,
}

impl DriverError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
		}
	}

	pub fn with_source(message: impl Into<String>, source: impl error::Error + Send + Sync + 'static) -> Self {
		Self {
			message: message.into(),
			source: Some(Box::new(source)),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

impl Display for DriverError {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

impl error::Error for DriverError {
	fn source(&self) -> Option<&(dyn error::Error + 'static)> {
		self.source.as_deref().map(|e| e as &(dyn error::Error + 'static))
	}
}
