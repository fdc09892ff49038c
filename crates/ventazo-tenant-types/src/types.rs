//! Common types used throughout the tenant settings crates.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{Error, VzResult};
use crate::settings::TenantSettingsPatch;

// TenantId //
//**********//
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TenantId(pub Box<str>);

impl TenantId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for TenantId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl From<&str> for TenantId {
	fn from(id: &str) -> Self {
		TenantId(id.into())
	}
}

impl Serialize for TenantId {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(&self.0)
	}
}

impl<'de> Deserialize<'de> for TenantId {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(TenantId(String::deserialize(deserializer)?.into()))
	}
}

// PlanTier //
//**********//
/// Subscription plan tiers, ordered from most to least restrictive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
	Free,
	Starter,
	Pro,
	Enterprise,
}

impl PlanTier {
	pub const ALL: [PlanTier; 4] =
		[PlanTier::Free, PlanTier::Starter, PlanTier::Pro, PlanTier::Enterprise];

	pub fn as_str(&self) -> &'static str {
		match self {
			PlanTier::Free => "free",
			PlanTier::Starter => "starter",
			PlanTier::Pro => "pro",
			PlanTier::Enterprise => "enterprise",
		}
	}
}

impl std::fmt::Display for PlanTier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for PlanTier {
	type Err = Error;

	fn from_str(s: &str) -> VzResult<Self> {
		let name = s.trim();
		PlanTier::ALL
			.into_iter()
			.find(|tier| tier.as_str().eq_ignore_ascii_case(name))
			.ok_or_else(|| Error::ValidationError(format!("Unknown plan tier: {}", name)))
	}
}

// Tenant //
//********//
/// Tenant record as delivered by the session/identity collaborator.
///
/// `plan` stays a raw string: unknown plan names are valid input and fall back
/// to the most restrictive tier during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
	pub id: TenantId,
	pub plan: Box<str>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub settings: Option<TenantSettingsPatch>,
}

impl Tenant {
	pub fn new(id: impl Into<Box<str>>, plan: impl Into<Box<str>>) -> Self {
		Tenant { id: TenantId(id.into()), plan: plan.into(), settings: None }
	}

	pub fn with_settings(mut self, settings: TenantSettingsPatch) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Parsed plan tier, `None` if the name is not recognized
	pub fn plan_tier(&self) -> Option<PlanTier> {
		self.plan.parse().ok()
	}
}

// Patch //
//*******//
/// Tri-state field for partial updates.
///
/// A missing field is `Undefined` (leave as is), an explicit `null` is `Null`
/// (clear), anything else is `Value`. Use together with `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
	#[default]
	Undefined,
	Null,
	Value(T),
}

impl<T> Patch<T> {
	pub fn is_undefined(&self) -> bool {
		matches!(self, Patch::Undefined)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Patch::Null)
	}

	pub fn is_value(&self) -> bool {
		matches!(self, Patch::Value(_))
	}

	pub fn value(&self) -> Option<&T> {
		match self {
			Patch::Value(v) => Some(v),
			_ => None,
		}
	}

	/// `None` for undefined, `Some(None)` for null, `Some(Some(v))` for a value
	pub fn as_option(&self) -> Option<Option<&T>> {
		match self {
			Patch::Undefined => None,
			Patch::Null => Some(None),
			Patch::Value(v) => Some(Some(v)),
		}
	}

	pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Patch<U> {
		match self {
			Patch::Undefined => Patch::Undefined,
			Patch::Null => Patch::Null,
			Patch::Value(v) => Patch::Value(f(v)),
		}
	}

	/// Apply onto an optional target: undefined keeps it, null clears it
	pub fn apply_to(&self, target: &mut Option<T>)
	where
		T: Clone,
	{
		match self {
			Patch::Undefined => {}
			Patch::Null => *target = None,
			Patch::Value(v) => *target = Some(v.clone()),
		}
	}
}

impl<T> From<Option<T>> for Patch<T> {
	fn from(value: Option<T>) -> Self {
		match value {
			Some(v) => Patch::Value(v),
			None => Patch::Null,
		}
	}
}

impl<T: Serialize> Serialize for Patch<T> {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		match self {
			Patch::Value(v) => v.serialize(serializer),
			Patch::Undefined | Patch::Null => serializer.serialize_none(),
		}
	}
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: serde::Deserializer<'de>,
	{
		Ok(Option::<T>::deserialize(deserializer)?.into())
	}
}


// vim: ts=4
