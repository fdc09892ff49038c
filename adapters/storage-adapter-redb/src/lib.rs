//! Redb-based storage adapter
//!
//! Implements the StorageAdapter trait on a single redb file holding one
//! `settings_kv` table of string keys and string values. Every write is its
//! own committed transaction, so a value is durable once `write` returns.

#![forbid(unsafe_code)]

use redb::{ReadableDatabase, ReadableTable, TableDefinition};
use std::path::{Path, PathBuf};

use ventazo::prelude::*;
use ventazo::storage_adapter::StorageAdapter;

mod error;
pub use error::Error;

/// Stores persisted settings records: key -> encoded record
const TABLE_SETTINGS: TableDefinition<&str, &str> = TableDefinition::new("settings_kv");

pub struct StorageAdapterRedb {
	path: PathBuf,
	db: redb::Database,
}

impl std::fmt::Debug for StorageAdapterRedb {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StorageAdapterRedb").field("path", &self.path).finish_non_exhaustive()
	}
}

impl StorageAdapterRedb {
	/// Open (or create) the redb file at `path`.
	///
	/// Missing parent directories are created.
	pub fn new(path: impl Into<PathBuf>) -> VzResult<Self> {
		let path = path.into();
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			std::fs::create_dir_all(parent).map_err(Error::from)?;
		}

		let db = redb::Database::create(&path).map_err(error::from_redb_error)?;

		// Initialize table
		{
			let tx = db.begin_write().map_err(error::from_redb_error)?;
			let _ = tx.open_table(TABLE_SETTINGS).map_err(error::from_redb_error)?;
			tx.commit().map_err(error::from_redb_error)?;
		}

		info!("Opened settings storage at {}", path.display());
		Ok(Self { path, db })
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl StorageAdapter for StorageAdapterRedb {
	fn read(&self, key: &str) -> VzResult<Option<Box<str>>> {
		let tx = self.db.begin_read().map_err(error::from_redb_error)?;
		let table = tx.open_table(TABLE_SETTINGS).map_err(error::from_redb_error)?;

		let value = table.get(key).map_err(error::from_redb_error)?.map(|v| v.value().into());
		trace!("read {}: {}", key, if value.is_some() { "hit" } else { "miss" });
		Ok(value)
	}

	fn write(&self, key: &str, value: &str) -> VzResult<()> {
		let tx = self.db.begin_write().map_err(error::from_redb_error)?;
		{
			let mut table = tx.open_table(TABLE_SETTINGS).map_err(error::from_redb_error)?;
			table.insert(key, value).map_err(error::from_redb_error)?;
		}
		tx.commit().map_err(error::from_redb_error)?;

		trace!("write {} ({} bytes)", key, value.len());
		Ok(())
	}

	fn remove(&self, key: &str) -> VzResult<()> {
		let tx = self.db.begin_write().map_err(error::from_redb_error)?;
		{
			let mut table = tx.open_table(TABLE_SETTINGS).map_err(error::from_redb_error)?;
			table.remove(key).map_err(error::from_redb_error)?;
		}
		tx.commit().map_err(error::from_redb_error)?;

		debug!("removed {}", key);
		Ok(())
	}
}

// vim: ts=4
