//! Shared types, the storage adapter trait, and error types for tenant
//! settings resolution.
//!
//! These live in their own crate so that storage adapters can depend on them
//! without pulling in the resolver itself.

#![forbid(unsafe_code)]

pub mod error;
pub mod features;
pub mod prelude;
pub mod settings;
pub mod storage_adapter;
pub mod types;

pub use error::{Error, VzResult};
pub use features::{Feature, FeaturesPatch, TenantFeatures};
pub use settings::{TenantSettings, TenantSettingsPatch};
pub use storage_adapter::StorageAdapter;
pub use types::{Patch, PlanTier, Tenant, TenantId};

// vim: ts=4
