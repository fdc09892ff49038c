//! Adapter that stores the persisted settings subset across sessions.
//!
//! The store only ever keeps string values under string keys, the way a
//! browser's local storage does. Encoding is the caller's business.

use std::fmt::Debug;

use crate::error::VzResult;

pub trait StorageAdapter: Debug + Send + Sync {
	/// Read the value stored under `key`, `None` if nothing is stored
	fn read(&self, key: &str) -> VzResult<Option<Box<str>>>;

	/// Store `value` under `key`, replacing any previous value
	fn write(&self, key: &str, value: &str) -> VzResult<()>;

	/// Remove the value stored under `key`. Removing a missing key is not an error.
	fn remove(&self, key: &str) -> VzResult<()>;
}

// vim: ts=4
