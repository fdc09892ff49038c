//! Tenant settings and partial settings updates

use serde::{Deserialize, Serialize};

use crate::features::{FeaturesPatch, TenantFeatures};
use crate::types::Patch;

pub const DEFAULT_CURRENCY: &str = "MXN";
pub const DEFAULT_LOCALE: &str = "es-MX";
pub const DEFAULT_TIMEZONE: &str = "America/Mexico_City";
pub const DEFAULT_DATE_FORMAT: &str = "DD/MM/YYYY";

/// Effective settings of the current tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettings {
	/// ISO 4217 currency code
	pub currency: Box<str>,
	/// BCP 47 locale tag
	pub locale: Box<str>,
	/// IANA timezone name
	pub timezone: Box<str>,
	pub date_format: Box<str>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub primary_color: Option<Box<str>>,
	/// Logo URL
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub logo: Option<Box<str>>,
	pub features: TenantFeatures,
}

impl Default for TenantSettings {
	fn default() -> Self {
		TenantSettings {
			currency: DEFAULT_CURRENCY.into(),
			locale: DEFAULT_LOCALE.into(),
			timezone: DEFAULT_TIMEZONE.into(),
			date_format: DEFAULT_DATE_FORMAT.into(),
			primary_color: None,
			logo: None,
			features: TenantFeatures::default(),
		}
	}
}

/// Partial settings.
///
/// Used both as the tenant's own override blob and as a runtime update.
/// Branding fields are tri-state so a runtime update can clear them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSettingsPatch {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub currency: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub locale: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timezone: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub date_format: Option<Box<str>>,
	#[serde(default, skip_serializing_if = "Patch::is_undefined")]
	pub primary_color: Patch<Box<str>>,
	#[serde(default, skip_serializing_if = "Patch::is_undefined")]
	pub logo: Patch<Box<str>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub features: Option<FeaturesPatch>,
}

impl TenantSettingsPatch {
	pub fn is_empty(&self) -> bool {
		self.currency.is_none()
			&& self.locale.is_none()
			&& self.timezone.is_none()
			&& self.date_format.is_none()
			&& self.primary_color.is_undefined()
			&& self.logo.is_undefined()
			&& self.features.is_none_or(|features| features.is_empty())
	}

	/// Drops blank strings and nulls, so they fall through to the layer below
	pub fn non_blank(&self) -> TenantSettingsPatch {
		fn keep(value: &Option<Box<str>>) -> Option<Box<str>> {
			value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
		}
		fn keep_patch(value: &Patch<Box<str>>) -> Patch<Box<str>> {
			match value.value() {
				Some(v) if !v.trim().is_empty() => Patch::Value(v.clone()),
				_ => Patch::Undefined,
			}
		}

		TenantSettingsPatch {
			currency: keep(&self.currency),
			locale: keep(&self.locale),
			timezone: keep(&self.timezone),
			date_format: keep(&self.date_format),
			primary_color: keep_patch(&self.primary_color),
			logo: keep_patch(&self.logo),
			features: self.features,
		}
	}
}


// vim: ts=4
