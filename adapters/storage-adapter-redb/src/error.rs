//! Error types for the redb storage adapter

use std::fmt;
use ventazo::error::Error as VentazoError;

/// Storage adapter-specific errors
#[derive(Debug)]
pub enum Error {
	/// Database operation error
	DbError(String),

	/// I/O error
	IoError(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::DbError(msg) => write!(f, "Database error: {}", msg),
			Error::IoError(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Error::IoError(err)
	}
}

impl From<Error> for VentazoError {
	fn from(err: Error) -> Self {
		match err {
			Error::IoError(io_err) => VentazoError::Io(io_err),
			Error::DbError(msg) => VentazoError::StorageError(msg),
		}
	}
}

/// Helper to convert redb errors
pub fn from_redb_error<E: fmt::Display>(err: E) -> Error {
	Error::DbError(err.to_string())
}

// vim: ts=4
