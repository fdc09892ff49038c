//! Layered settings resolution
//!
//! Resolving a tenant applies two layers on top of the current settings:
//!
//! 1. the plan tier: the feature set is rebuilt from the global default flags
//!    with the plan overlay on top
//! 2. the tenant's own override blob, "last non-empty value wins": blank
//!    strings fall through and the prior value is retained
//!
//! Runtime updates are a plain shallow merge ([`apply_patch`]): whatever the
//! patch supplies replaces the current value, and `features` is merged flag by
//! flag.
//!
//! Everything here is pure and knows nothing about storage.

use std::sync::Arc;

use crate::plans::FrozenPlanRegistry;
use ventazo_tenant_types::{
	FeaturesPatch, Tenant, TenantFeatures, TenantSettings, TenantSettingsPatch,
};

/// Feature set of a plan: global defaults with the plan overlay on top
pub fn resolve_features(defaults: &TenantFeatures, plan: &FeaturesPatch) -> TenantFeatures {
	defaults.overlay(plan)
}

/// Overlay a tenant override on `settings`.
///
/// Only the six scalar fields take part; the override's `features` are ignored,
/// entitlements come from the plan alone.
pub fn overlay_tenant(settings: &mut TenantSettings, tenant_override: &TenantSettingsPatch) {
	let ovr = tenant_override.non_blank();

	if let Some(currency) = ovr.currency {
		settings.currency = currency;
	}
	if let Some(locale) = ovr.locale {
		settings.locale = locale;
	}
	if let Some(timezone) = ovr.timezone {
		settings.timezone = timezone;
	}
	if let Some(date_format) = ovr.date_format {
		settings.date_format = date_format;
	}
	ovr.primary_color.apply_to(&mut settings.primary_color);
	ovr.logo.apply_to(&mut settings.logo);
}

/// Shallow-merge a runtime patch into `settings`
pub fn apply_patch(settings: &mut TenantSettings, patch: &TenantSettingsPatch) {
	if let Some(currency) = &patch.currency {
		settings.currency = currency.clone();
	}
	if let Some(locale) = &patch.locale {
		settings.locale = locale.clone();
	}
	if let Some(timezone) = &patch.timezone {
		settings.timezone = timezone.clone();
	}
	if let Some(date_format) = &patch.date_format {
		settings.date_format = date_format.clone();
	}
	patch.primary_color.apply_to(&mut settings.primary_color);
	patch.logo.apply_to(&mut settings.logo);
	if let Some(features) = &patch.features {
		settings.features.apply(features);
	}
}

/// The layers `set_tenant` applies on top of the current settings
#[derive(Debug, Clone, Copy)]
pub struct SettingsLayers<'a> {
	/// Settings the layers are applied to
	pub base: &'a TenantSettings,
	/// Flags the plan overlay starts from
	pub default_features: &'a TenantFeatures,
	pub plan: Option<&'a FeaturesPatch>,
	pub tenant: Option<&'a TenantSettingsPatch>,
}

impl<'a> SettingsLayers<'a> {
	pub fn new(base: &'a TenantSettings, default_features: &'a TenantFeatures) -> Self {
		SettingsLayers { base, default_features, plan: None, tenant: None }
	}

	pub fn plan(mut self, plan: &'a FeaturesPatch) -> Self {
		self.plan = Some(plan);
		self
	}

	pub fn tenant(mut self, tenant: &'a TenantSettingsPatch) -> Self {
		self.tenant = Some(tenant);
		self
	}

	pub fn resolve(&self) -> TenantSettings {
		let mut settings = self.base.clone();
		if let Some(plan) = self.plan {
			settings.features = resolve_features(self.default_features, plan);
		}
		if let Some(tenant) = self.tenant {
			overlay_tenant(&mut settings, tenant);
		}
		settings
	}
}

/// Resolves a tenant record into effective settings using the global defaults
/// and a frozen plan table
#[derive(Debug, Clone)]
pub struct SettingsResolver {
	defaults: TenantSettings,
	plans: Arc<FrozenPlanRegistry>,
}

impl SettingsResolver {
	pub fn new(defaults: TenantSettings, plans: Arc<FrozenPlanRegistry>) -> Self {
		SettingsResolver { defaults, plans }
	}

	pub fn defaults(&self) -> &TenantSettings {
		&self.defaults
	}

	pub fn plans(&self) -> &Arc<FrozenPlanRegistry> {
		&self.plans
	}

	/// Settings for `tenant` layered onto `current`.
	///
	/// Features come from the plan alone; the other fields keep their current
	/// value unless the tenant override supplies a non-empty one.
	pub fn resolve_tenant(&self, current: &TenantSettings, tenant: &Tenant) -> TenantSettings {
		let plan = self.plans.resolve(&tenant.plan);
		let mut layers = SettingsLayers::new(current, &self.defaults.features).plan(&plan.features);
		if let Some(tenant_override) = &tenant.settings {
			layers = layers.tenant(tenant_override);
		}
		layers.resolve()
	}
}


// vim: ts=4
