//! Tenant settings resolver for Ventazo CRM.
//!
//! Given a tenant and its plan tier, the resolver computes the effective
//! feature flags and locale settings, layers the tenant's own overrides on
//! top, and keeps a small durable subset (currency, locale, timezone, date
//! format) in a [`StorageAdapter`](ventazo_tenant_types::StorageAdapter).
//!
//! # Architecture
//!
//! - **Plans** (`plans.rs`): plan registry, built-in plan table
//! - **Resolve** (`resolve.rs`): pure layered resolution
//! - **Persist** (`persist.rs`): the persisted subset and its mapping
//! - **Store** (`store.rs`): state holder with selectors and mutations
//! - **Config** (`config.rs`): YAML/env configuration
//!
//! ```
//! use ventazo_tenant::{Tenant, TenantSettingsStore};
//!
//! let store = TenantSettingsStore::builder().build()?;
//! store.set_tenant(Some(Tenant::new("t1", "pro")));
//! assert!(store.has_feature("whatsapp"));
//!
//! store.clear_tenant();
//! assert!(!store.has_feature("whatsapp"));
//! # Ok::<(), ventazo_tenant::Error>(())
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod memory;
pub mod persist;
pub mod plans;
pub mod prelude;
pub mod resolve;
pub mod store;

pub use config::StoreConfig;
pub use memory::InMemoryStorage;
pub use persist::PersistedSettings;
pub use plans::{FrozenPlanRegistry, PlanDefinition, PlanRegistry};
pub use resolve::{SettingsLayers, SettingsResolver};
pub use store::{TenantSettingsStore, TenantSettingsStoreBuilder, TenantState};

pub use ventazo_tenant_types::{
	Error, Feature, FeaturesPatch, Patch, PlanTier, StorageAdapter, Tenant, TenantFeatures,
	TenantId, TenantSettings, TenantSettingsPatch, VzResult,
};

// vim: ts=4
