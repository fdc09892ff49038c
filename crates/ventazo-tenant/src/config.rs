//! Store configuration
//!
//! Every section is optional; anything left out falls back to the built-in
//! defaults and plan table. Values are read from YAML and can be overridden
//! from the environment.
//!
//! Configuration keys are snake_case (`storage_key`, `date_format`). Feature
//! flags inside a plan table keep their wire names (`emailSync`), the same
//! names `has_feature` and tenant records use; any other spelling is rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::plans::{FrozenPlanRegistry, PlanTableConfig};
use crate::prelude::*;
use crate::resolve::SettingsResolver;
use ventazo_tenant_types::TenantSettings;
use ventazo_tenant_types::settings::{
	DEFAULT_CURRENCY, DEFAULT_DATE_FORMAT, DEFAULT_LOCALE, DEFAULT_TIMEZONE,
};

/// Key the persisted subset is stored under
pub const DEFAULT_STORAGE_KEY: &str = "ventazo-tenant-settings";

pub const ENV_STORAGE_KEY: &str = "VENTAZO_TENANT_STORAGE_KEY";
pub const ENV_CURRENCY: &str = "VENTAZO_TENANT_CURRENCY";
pub const ENV_LOCALE: &str = "VENTAZO_TENANT_LOCALE";
pub const ENV_TIMEZONE: &str = "VENTAZO_TENANT_TIMEZONE";
pub const ENV_DATE_FORMAT: &str = "VENTAZO_TENANT_DATE_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
	pub storage_key: Box<str>,
	pub defaults: DefaultsConfig,
	/// Replaces the built-in plan table when present
	pub plans: Option<PlanTableConfig>,
}

impl Default for StoreConfig {
	fn default() -> Self {
		StoreConfig {
			storage_key: DEFAULT_STORAGE_KEY.into(),
			defaults: DefaultsConfig::default(),
			plans: None,
		}
	}
}

/// Global default locale settings (features come from the global default set)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
	pub currency: Box<str>,
	pub locale: Box<str>,
	pub timezone: Box<str>,
	pub date_format: Box<str>,
}

impl Default for DefaultsConfig {
	fn default() -> Self {
		DefaultsConfig {
			currency: DEFAULT_CURRENCY.into(),
			locale: DEFAULT_LOCALE.into(),
			timezone: DEFAULT_TIMEZONE.into(),
			date_format: DEFAULT_DATE_FORMAT.into(),
		}
	}
}

impl StoreConfig {
	pub fn from_yaml_str(yaml: &str) -> VzResult<Self> {
		Ok(serde_yaml::from_str(yaml)?)
	}

	pub fn from_yaml_file(path: impl AsRef<Path>) -> VzResult<Self> {
		let path = path.as_ref();
		debug!("Loading store config from {}", path.display());
		let yaml = std::fs::read_to_string(path)?;
		Self::from_yaml_str(&yaml)
	}

	/// Apply overrides from the process environment
	pub fn apply_env(&mut self) {
		self.apply_env_with(|name| std::env::var(name).ok());
	}

	/// Apply overrides from an arbitrary variable lookup
	pub fn apply_env_with<F>(&mut self, lookup: F)
	where
		F: Fn(&str) -> Option<String>,
	{
		let targets: [(&str, &mut Box<str>); 5] = [
			(ENV_STORAGE_KEY, &mut self.storage_key),
			(ENV_CURRENCY, &mut self.defaults.currency),
			(ENV_LOCALE, &mut self.defaults.locale),
			(ENV_TIMEZONE, &mut self.defaults.timezone),
			(ENV_DATE_FORMAT, &mut self.defaults.date_format),
		];
		for (name, target) in targets {
			if let Some(value) = lookup(name) {
				debug!("Config override from {}", name);
				*target = value.into();
			}
		}
	}

	pub fn validate(&self) -> VzResult<()> {
		if self.storage_key.trim().is_empty() {
			return Err(Error::ConfigError("storage_key must not be empty".into()));
		}

		let currency = &self.defaults.currency;
		if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
			return Err(Error::ConfigError(format!(
				"Default currency '{}' is not a three-letter ISO 4217 code",
				currency
			)));
		}

		for (name, value) in [
			("locale", &self.defaults.locale),
			("timezone", &self.defaults.timezone),
			("date_format", &self.defaults.date_format),
		] {
			if value.trim().is_empty() {
				return Err(Error::ConfigError(format!("Default {} must not be empty", name)));
			}
		}

		Ok(())
	}

	/// The global default settings this configuration describes
	pub fn default_settings(&self) -> TenantSettings {
		TenantSettings {
			currency: self.defaults.currency.clone(),
			locale: self.defaults.locale.clone(),
			timezone: self.defaults.timezone.clone(),
			date_format: self.defaults.date_format.clone(),
			..Default::default()
		}
	}

	pub fn plan_registry(&self) -> VzResult<FrozenPlanRegistry> {
		match &self.plans {
			Some(table) => table.clone().into_registry(),
			None => FrozenPlanRegistry::builtin(),
		}
	}

	pub fn build_resolver(&self) -> VzResult<SettingsResolver> {
		self.validate()?;
		Ok(SettingsResolver::new(self.default_settings(), Arc::new(self.plan_registry()?)))
	}
}


// vim: ts=4
