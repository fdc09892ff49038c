//! Error types shared by the resolver and its storage adapters

use std::fmt;

pub type VzResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	/// Invalid or inconsistent configuration (plan table, defaults, storage key)
	ConfigError(String),

	/// A value failed to parse or validate
	ValidationError(String),

	/// Durable storage backend failure
	StorageError(String),

	/// Encoding or decoding failure
	SerializationError(String),

	// externals
	Io(std::io::Error),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Error::ConfigError(msg) => write!(f, "config error: {}", msg),
			Error::ValidationError(msg) => write!(f, "validation error: {}", msg),
			Error::StorageError(msg) => write!(f, "storage error: {}", msg),
			Error::SerializationError(msg) => write!(f, "serialization error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Error::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Self::SerializationError(err.to_string())
	}
}

impl From<serde_yaml::Error> for Error {
	fn from(err: serde_yaml::Error) -> Self {
		Self::ConfigError(err.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_includes_message() {
		let err = Error::ConfigError("storage key is empty".into());
		assert_eq!(err.to_string(), "config error: storage key is empty");

		let err = Error::StorageError("disk full".into());
		assert_eq!(err.to_string(), "storage error: disk full");
	}

	#[test]
	fn test_json_error_maps_to_serialization() {
		let parse = serde_json::from_str::<serde_json::Value>("{not json");
		let err: Error = match parse {
			Ok(_) => panic!("invalid json parsed"),
			Err(e) => e.into(),
		};
		assert!(matches!(err, Error::SerializationError(_)));
	}

	#[test]
	fn test_io_error_keeps_source() {
		let err: Error = std::io::Error::other("boom").into();
		assert!(std::error::Error::source(&err).is_some());
	}
}

// vim: ts=4
