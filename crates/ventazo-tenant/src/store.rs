//! Tenant settings store
//!
//! Single owner of the current tenant and its effective settings. Callers read
//! through selectors and change state only through the mutation methods; every
//! mutation runs under one write lock, recomputes or merges the settings, and
//! writes the persisted subset to storage before the lock is released.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

use crate::config::StoreConfig;
use crate::memory::InMemoryStorage;
use crate::persist::PersistedSettings;
use crate::prelude::*;
use crate::resolve::{SettingsResolver, apply_patch};
use ventazo_tenant_types::{
	Feature, StorageAdapter, TenantFeatures, TenantSettings, TenantSettingsPatch,
};

/// Everything the store tracks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantState {
	pub tenant: Option<Tenant>,
	pub settings: TenantSettings,
	/// Owned by the caller's tenant-fetch logic, never set by the resolver itself
	pub is_loading: bool,
	/// Owned by the caller's tenant-fetch logic, never set by the resolver itself
	pub error: Option<Box<str>>,
}

impl TenantState {
	fn new(settings: TenantSettings) -> Self {
		TenantState { tenant: None, settings, is_loading: false, error: None }
	}
}

pub struct TenantSettingsStore {
	resolver: SettingsResolver,
	storage: Arc<dyn StorageAdapter>,
	storage_key: Box<str>,
	state: RwLock<TenantState>,
	changes: watch::Sender<TenantSettings>,
}

impl std::fmt::Debug for TenantSettingsStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TenantSettingsStore")
			.field("storage", &self.storage)
			.field("storage_key", &self.storage_key)
			.field("state", &*self.state.read())
			.finish_non_exhaustive()
	}
}

impl TenantSettingsStore {
	pub fn builder() -> TenantSettingsStoreBuilder {
		TenantSettingsStoreBuilder::new()
	}

	/// Create a store and hydrate it from `storage`.
	///
	/// Only the persisted subset is restored; the tenant starts out empty.
	pub fn new(
		resolver: SettingsResolver,
		storage: Arc<dyn StorageAdapter>,
		storage_key: impl Into<Box<str>>,
	) -> Self {
		let storage_key = storage_key.into();
		let settings = hydrate(&*storage, &storage_key, resolver.defaults());
		let (changes, _) = watch::channel(settings.clone());

		info!("Tenant settings store ready (key: {})", storage_key);
		TenantSettingsStore {
			resolver,
			storage,
			storage_key,
			state: RwLock::new(TenantState::new(settings)),
			changes,
		}
	}

	// Selectors
	//***********

	pub fn tenant(&self) -> Option<Tenant> {
		self.state.read().tenant.clone()
	}

	pub fn settings(&self) -> TenantSettings {
		self.state.read().settings.clone()
	}

	pub fn features(&self) -> TenantFeatures {
		self.state.read().settings.features
	}

	/// Value of a flag by wire name. Unknown names are reported as disabled.
	pub fn has_feature(&self, name: &str) -> bool {
		match name.parse::<Feature>() {
			Ok(feature) => self.is_enabled(feature),
			Err(_) => {
				debug!("has_feature: unknown feature '{}'", name);
				false
			}
		}
	}

	pub fn is_enabled(&self, feature: Feature) -> bool {
		self.state.read().settings.features.get(feature)
	}

	pub fn is_loading(&self) -> bool {
		self.state.read().is_loading
	}

	pub fn error(&self) -> Option<Box<str>> {
		self.state.read().error.clone()
	}

	pub fn snapshot(&self) -> TenantState {
		self.state.read().clone()
	}

	/// Project a value out of the state under a single read lock
	pub fn select<R>(&self, f: impl FnOnce(&TenantState) -> R) -> R {
		f(&self.state.read())
	}

	/// Observe the effective settings. Only actual changes are signalled.
	pub fn subscribe(&self) -> watch::Receiver<TenantSettings> {
		self.changes.subscribe()
	}

	pub fn resolver(&self) -> &SettingsResolver {
		&self.resolver
	}

	// Mutations
	//***********

	/// Store the tenant and resolve its settings onto the current ones.
	///
	/// Features are rebuilt from the plan; currency, locale, timezone and date
	/// format keep their current (possibly restored) values unless the tenant
	/// overrides them. Branding is reset when a different tenant comes in.
	///
	/// `None` only forgets the tenant; the last resolved settings stay in place
	/// until `clear_tenant`.
	pub fn set_tenant(&self, tenant: Option<Tenant>) {
		self.commit(|state| {
			match &tenant {
				Some(tenant) => {
					debug!("set_tenant: {} (plan: {})", tenant.id, tenant.plan);
					if state.tenant.as_ref().is_none_or(|prev| prev.id != tenant.id) {
						let defaults = self.resolver.defaults();
						state.settings.primary_color.clone_from(&defaults.primary_color);
						state.settings.logo.clone_from(&defaults.logo);
					}
					state.settings = self.resolver.resolve_tenant(&state.settings, tenant);
				}
				None => debug!("set_tenant: none"),
			}
			state.tenant = tenant;
		});
	}

	/// Merge a partial update into the current settings
	pub fn update_settings(&self, patch: TenantSettingsPatch) {
		self.commit(|state| {
			debug!("update_settings: {:?}", patch);
			apply_patch(&mut state.settings, &patch);
		});
	}

	/// Forget the tenant and return to the global defaults
	pub fn clear_tenant(&self) {
		self.commit(|state| {
			debug!("clear_tenant");
			*state = TenantState::new(self.resolver.defaults().clone());
		});
	}

	pub fn set_loading(&self, is_loading: bool) {
		self.commit(|state| state.is_loading = is_loading);
	}

	pub fn set_error(&self, error: Option<impl Into<Box<str>>>) {
		let error = error.map(Into::into);
		self.commit(|state| state.error = error);
	}

	fn commit(&self, f: impl FnOnce(&mut TenantState)) {
		let mut state = self.state.write();
		f(&mut state);
		self.persist(&PersistedSettings::from(&state.settings));

		let settings = &state.settings;
		self.changes.send_if_modified(|current| {
			if current == settings {
				false
			} else {
				*current = settings.clone();
				true
			}
		});
	}

	/// Write the durable subset. Failures are logged and otherwise ignored.
	fn persist(&self, persisted: &PersistedSettings) {
		let res = persisted.encode().and_then(|data| self.storage.write(&self.storage_key, &data));
		if let Err(err) = res {
			warn!("Failed to persist tenant settings under '{}': {}", self.storage_key, err);
		}
	}
}

/// Defaults with the persisted subset restored on top
fn hydrate(storage: &dyn StorageAdapter, key: &str, defaults: &TenantSettings) -> TenantSettings {
	let data = match storage.read(key) {
		Ok(Some(data)) => data,
		Ok(None) => {
			debug!("No persisted tenant settings under '{}'", key);
			return defaults.clone();
		}
		Err(err) => {
			warn!("Failed to read persisted tenant settings '{}': {}", key, err);
			return defaults.clone();
		}
	};

	match PersistedSettings::decode(&data) {
		Ok(persisted) => {
			debug!("Restored persisted tenant settings from '{}'", key);
			persisted.restore_onto(defaults)
		}
		Err(err) => {
			warn!("Ignoring unreadable persisted tenant settings '{}': {}", key, err);
			defaults.clone()
		}
	}
}

/// Builder for [`TenantSettingsStore`]
#[derive(Debug, Default)]
pub struct TenantSettingsStoreBuilder {
	config: StoreConfig,
	storage: Option<Arc<dyn StorageAdapter>>,
}

impl TenantSettingsStoreBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn config(mut self, config: StoreConfig) -> Self {
		self.config = config;
		self
	}

	pub fn storage_key(mut self, storage_key: impl Into<Box<str>>) -> Self {
		self.config.storage_key = storage_key.into();
		self
	}

	/// Storage adapter for the persisted subset (defaults to [`InMemoryStorage`])
	pub fn storage(mut self, storage: Arc<dyn StorageAdapter>) -> Self {
		self.storage = Some(storage);
		self
	}

	pub fn build(self) -> VzResult<TenantSettingsStore> {
		let resolver = self.config.build_resolver()?;
		let storage = self.storage.unwrap_or_else(|| Arc::new(InMemoryStorage::new()));
		Ok(TenantSettingsStore::new(resolver, storage, self.config.storage_key))
	}
}


// vim: ts=4
