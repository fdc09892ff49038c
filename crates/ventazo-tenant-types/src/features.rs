//! Feature flags
//!
//! The flag set is closed: every flag exists as a `Feature` variant, a field of
//! `TenantFeatures` (resolved value) and a field of `FeaturesPatch` (overlay).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, VzResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Feature {
	/// WhatsApp messaging integration
	Whatsapp,
	/// CFDI tax document (e-invoice) generation
	Cfdi,
	Analytics,
	/// Workflow automation
	Workflows,
	CustomFields,
	EmailSync,
	CalendarIntegration,
	DocumentManagement,
}

impl Feature {
	pub const ALL: [Feature; 8] = [
		Feature::Whatsapp,
		Feature::Cfdi,
		Feature::Analytics,
		Feature::Workflows,
		Feature::CustomFields,
		Feature::EmailSync,
		Feature::CalendarIntegration,
		Feature::DocumentManagement,
	];

	/// Wire name of the flag
	pub fn as_str(&self) -> &'static str {
		match self {
			Feature::Whatsapp => "whatsapp",
			Feature::Cfdi => "cfdi",
			Feature::Analytics => "analytics",
			Feature::Workflows => "workflows",
			Feature::CustomFields => "customFields",
			Feature::EmailSync => "emailSync",
			Feature::CalendarIntegration => "calendarIntegration",
			Feature::DocumentManagement => "documentManagement",
		}
	}
}

impl std::fmt::Display for Feature {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Feature {
	type Err = Error;

	fn from_str(s: &str) -> VzResult<Self> {
		Feature::ALL
			.into_iter()
			.find(|feature| feature.as_str() == s)
			.ok_or_else(|| Error::ValidationError(format!("Unknown feature: {}", s)))
	}
}

/// Resolved feature flags of a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantFeatures {
	pub whatsapp: bool,
	pub cfdi: bool,
	pub analytics: bool,
	pub workflows: bool,
	pub custom_fields: bool,
	pub email_sync: bool,
	pub calendar_integration: bool,
	pub document_management: bool,
}

impl Default for TenantFeatures {
	/// Global default set: only the features that are not sold separately
	fn default() -> Self {
		TenantFeatures {
			whatsapp: false,
			cfdi: false,
			analytics: false,
			workflows: false,
			custom_fields: true,
			email_sync: true,
			calendar_integration: true,
			document_management: false,
		}
	}
}

impl TenantFeatures {
	/// Every flag enabled
	pub fn all() -> Self {
		TenantFeatures {
			whatsapp: true,
			cfdi: true,
			analytics: true,
			workflows: true,
			custom_fields: true,
			email_sync: true,
			calendar_integration: true,
			document_management: true,
		}
	}

	pub fn get(&self, feature: Feature) -> bool {
		match feature {
			Feature::Whatsapp => self.whatsapp,
			Feature::Cfdi => self.cfdi,
			Feature::Analytics => self.analytics,
			Feature::Workflows => self.workflows,
			Feature::CustomFields => self.custom_fields,
			Feature::EmailSync => self.email_sync,
			Feature::CalendarIntegration => self.calendar_integration,
			Feature::DocumentManagement => self.document_management,
		}
	}

	pub fn set(&mut self, feature: Feature, enabled: bool) {
		let flag = match feature {
			Feature::Whatsapp => &mut self.whatsapp,
			Feature::Cfdi => &mut self.cfdi,
			Feature::Analytics => &mut self.analytics,
			Feature::Workflows => &mut self.workflows,
			Feature::CustomFields => &mut self.custom_fields,
			Feature::EmailSync => &mut self.email_sync,
			Feature::CalendarIntegration => &mut self.calendar_integration,
			Feature::DocumentManagement => &mut self.document_management,
		};
		*flag = enabled;
	}

	/// Overwrite the flags the patch specifies, keep the rest
	pub fn apply(&mut self, patch: &FeaturesPatch) {
		for feature in Feature::ALL {
			if let Some(enabled) = patch.get(feature) {
				self.set(feature, enabled);
			}
		}
	}

	pub fn overlay(mut self, patch: &FeaturesPatch) -> Self {
		self.apply(patch);
		self
	}

	pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
		Feature::ALL.into_iter().filter(|feature| self.get(*feature))
	}
}

/// Partial feature flags: plan table entries and the `features` part of a settings patch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesPatch {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub whatsapp: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub cfdi: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub analytics: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub workflows: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub custom_fields: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email_sync: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub calendar_integration: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub document_management: Option<bool>,
}

impl FeaturesPatch {
	pub fn get(&self, feature: Feature) -> Option<bool> {
		match feature {
			Feature::Whatsapp => self.whatsapp,
			Feature::Cfdi => self.cfdi,
			Feature::Analytics => self.analytics,
			Feature::Workflows => self.workflows,
			Feature::CustomFields => self.custom_fields,
			Feature::EmailSync => self.email_sync,
			Feature::CalendarIntegration => self.calendar_integration,
			Feature::DocumentManagement => self.document_management,
		}
	}

	/// Builder-style setter
	pub fn with(mut self, feature: Feature, enabled: bool) -> Self {
		let flag = match feature {
			Feature::Whatsapp => &mut self.whatsapp,
			Feature::Cfdi => &mut self.cfdi,
			Feature::Analytics => &mut self.analytics,
			Feature::Workflows => &mut self.workflows,
			Feature::CustomFields => &mut self.custom_fields,
			Feature::EmailSync => &mut self.email_sync,
			Feature::CalendarIntegration => &mut self.calendar_integration,
			Feature::DocumentManagement => &mut self.document_management,
		};
		*flag = Some(enabled);
		self
	}

	/// Patch enabling every listed feature
	pub fn enabling(features: impl IntoIterator<Item = Feature>) -> Self {
		features.into_iter().fold(FeaturesPatch::default(), |patch, f| patch.with(f, true))
	}

	pub fn is_empty(&self) -> bool {
		Feature::ALL.into_iter().all(|feature| self.get(feature).is_none())
	}
}


// vim: ts=4
