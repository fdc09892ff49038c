//! Persisted settings subset
//!
//! Only currency, locale, timezone and date format survive a restart. Feature
//! flags, branding and tenant identity are always re-derived from a fresh
//! tenant record, so a plan change or a logout never leaves stale entitlements
//! behind.

use serde::{Deserialize, Serialize};

use crate::prelude::*;
use ventazo_tenant_types::TenantSettings;

/// The durable record: exactly four plain strings, no version tag.
///
/// Decoding is lenient: missing fields come back empty and are skipped on
/// restore, unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSettings {
	#[serde(default)]
	pub currency: Box<str>,
	#[serde(default)]
	pub locale: Box<str>,
	#[serde(default)]
	pub timezone: Box<str>,
	#[serde(default)]
	pub date_format: Box<str>,
}

impl From<&TenantSettings> for PersistedSettings {
	fn from(settings: &TenantSettings) -> Self {
		PersistedSettings {
			currency: settings.currency.clone(),
			locale: settings.locale.clone(),
			timezone: settings.timezone.clone(),
			date_format: settings.date_format.clone(),
		}
	}
}

impl PersistedSettings {
	/// Restore the persisted fields onto `settings`. Empty fields are skipped.
	pub fn restore_into(self, settings: &mut TenantSettings) {
		fn restore(target: &mut Box<str>, value: Box<str>) {
			if !value.trim().is_empty() {
				*target = value;
			}
		}

		restore(&mut settings.currency, self.currency);
		restore(&mut settings.locale, self.locale);
		restore(&mut settings.timezone, self.timezone);
		restore(&mut settings.date_format, self.date_format);
	}

	/// `base` with the persisted fields restored on top
	pub fn restore_onto(self, base: &TenantSettings) -> TenantSettings {
		let mut settings = base.clone();
		self.restore_into(&mut settings);
		settings
	}

	pub fn encode(&self) -> VzResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	pub fn decode(data: &str) -> VzResult<Self> {
		Ok(serde_json::from_str(data)?)
	}
}


// vim: ts=4
