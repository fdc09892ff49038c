//! Process-lifetime storage adapter

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::prelude::*;
use ventazo_tenant_types::StorageAdapter;

/// Keeps values in memory only; everything is gone when the process exits
#[derive(Debug, Default)]
pub struct InMemoryStorage {
	values: RwLock<HashMap<Box<str>, Box<str>>>,
}

impl InMemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}
}

impl StorageAdapter for InMemoryStorage {
	fn read(&self, key: &str) -> VzResult<Option<Box<str>>> {
		Ok(self.values.read().get(key).cloned())
	}

	fn write(&self, key: &str, value: &str) -> VzResult<()> {
		self.values.write().insert(key.into(), value.into());
		Ok(())
	}

	fn remove(&self, key: &str) -> VzResult<()> {
		self.values.write().remove(key);
		Ok(())
	}
}


// vim: ts=4
