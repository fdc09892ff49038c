//! Plan table: feature defaults per subscription tier
//!
//! Plans are registered into a [`PlanRegistry`] at startup and frozen into a
//! [`FrozenPlanRegistry`] before the resolver uses them. The frozen registry
//! always contains the fallback tier, which answers for every plan name it
//! does not recognize.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::prelude::*;
use ventazo_tenant_types::{Feature, FeaturesPatch};

/// Feature defaults of one plan tier, overlaid on the global default feature set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDefinition {
	pub tier: PlanTier,
	pub description: Box<str>,
	pub features: FeaturesPatch,
}

impl PlanDefinition {
	pub fn builder(tier: PlanTier) -> PlanDefinitionBuilder {
		PlanDefinitionBuilder::new(tier)
	}
}

pub struct PlanDefinitionBuilder {
	tier: PlanTier,
	description: Option<Box<str>>,
	features: FeaturesPatch,
}

impl PlanDefinitionBuilder {
	pub fn new(tier: PlanTier) -> Self {
		Self { tier, description: None, features: FeaturesPatch::default() }
	}

	/// Set the description (required)
	pub fn description(mut self, description: impl Into<Box<str>>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Replace the whole feature overlay
	pub fn features(mut self, features: FeaturesPatch) -> Self {
		self.features = features;
		self
	}

	pub fn enable(mut self, feature: Feature) -> Self {
		self.features = self.features.with(feature, true);
		self
	}

	pub fn disable(mut self, feature: Feature) -> Self {
		self.features = self.features.with(feature, false);
		self
	}

	pub fn build(self) -> VzResult<PlanDefinition> {
		let description = self.description.ok_or_else(|| {
			Error::ConfigError(format!("Plan '{}' needs a description", self.tier))
		})?;

		Ok(PlanDefinition { tier: self.tier, description, features: self.features })
	}
}

/// Mutable registry used during initialization
pub struct PlanRegistry {
	plans: HashMap<PlanTier, PlanDefinition>,
	fallback: PlanTier,
}

impl PlanRegistry {
	pub fn new() -> Self {
		Self { plans: HashMap::new(), fallback: PlanTier::Free }
	}

	pub fn register(&mut self, def: PlanDefinition) -> VzResult<()> {
		if self.plans.contains_key(&def.tier) {
			return Err(Error::ConfigError(format!("Plan '{}' is already registered", def.tier)));
		}

		debug!("Registering plan: {}", def.tier);
		self.plans.insert(def.tier, def);
		Ok(())
	}

	/// Tier used for unknown or unregistered plan names (defaults to `free`)
	pub fn set_fallback(&mut self, tier: PlanTier) {
		self.fallback = tier;
	}

	pub fn freeze(mut self) -> VzResult<FrozenPlanRegistry> {
		let fallback = self.plans.remove(&self.fallback).ok_or_else(|| {
			Error::ConfigError(format!("Fallback plan '{}' is not registered", self.fallback))
		})?;

		info!(
			"Freezing plan registry with {} plans (fallback: {})",
			self.plans.len() + 1,
			fallback.tier
		);
		Ok(FrozenPlanRegistry { plans: self.plans, fallback })
	}

	pub fn len(&self) -> usize {
		self.plans.len()
	}

	pub fn is_empty(&self) -> bool {
		self.plans.is_empty()
	}
}

impl Default for PlanRegistry {
	fn default() -> Self {
		Self::new()
	}
}

/// Immutable plan table used by the resolver
#[derive(Debug)]
pub struct FrozenPlanRegistry {
	plans: HashMap<PlanTier, PlanDefinition>,
	fallback: PlanDefinition,
}

impl FrozenPlanRegistry {
	/// Registry with the built-in plan table
	pub fn builtin() -> VzResult<Self> {
		let mut registry = PlanRegistry::new();
		register_default_plans(&mut registry)?;
		registry.freeze()
	}

	pub fn get(&self, tier: PlanTier) -> Option<&PlanDefinition> {
		if tier == self.fallback.tier { Some(&self.fallback) } else { self.plans.get(&tier) }
	}

	pub fn fallback(&self) -> &PlanDefinition {
		&self.fallback
	}

	/// Plan definition for a raw plan name.
	///
	/// Unknown names, and known tiers missing from the table, resolve to the fallback plan.
	pub fn resolve(&self, plan: &str) -> &PlanDefinition {
		match plan.parse::<PlanTier>() {
			Ok(tier) => self.get(tier).unwrap_or_else(|| {
				warn!("Plan '{}' is not in the plan table, using '{}'", tier, self.fallback.tier);
				&self.fallback
			}),
			Err(_) => {
				warn!("Unrecognized plan '{}', using '{}'", plan, self.fallback.tier);
				&self.fallback
			}
		}
	}

	/// All plans, ordered by tier
	pub fn list(&self) -> Vec<&PlanDefinition> {
		let mut plans: Vec<_> = self.plans.values().chain(std::iter::once(&self.fallback)).collect();
		plans.sort_by_key(|def| def.tier);
		plans
	}

	pub fn len(&self) -> usize {
		self.plans.len() + 1
	}

	pub fn is_empty(&self) -> bool {
		false
	}
}

/// Register the built-in plan table
pub fn register_default_plans(registry: &mut PlanRegistry) -> VzResult<()> {
	// Free keeps the global defaults untouched
	registry.register(PlanDefinition::builder(PlanTier::Free).description("Free").build()?)?;

	registry.register(
		PlanDefinition::builder(PlanTier::Starter)
			.description("Starter")
			.enable(Feature::Analytics)
			.enable(Feature::DocumentManagement)
			.build()?,
	)?;

	registry.register(
		PlanDefinition::builder(PlanTier::Pro)
			.description("Pro")
			.enable(Feature::Whatsapp)
			.enable(Feature::Cfdi)
			.enable(Feature::Analytics)
			.enable(Feature::Workflows)
			.enable(Feature::DocumentManagement)
			.build()?,
	)?;

	registry.register(
		PlanDefinition::builder(PlanTier::Enterprise)
			.description("Enterprise")
			.features(FeaturesPatch::enabling(Feature::ALL))
			.build()?,
	)?;

	registry.set_fallback(PlanTier::Free);
	Ok(())
}

/// Plan table as read from configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanTableConfig {
	#[serde(default = "default_fallback")]
	pub fallback: PlanTier,
	pub tiers: BTreeMap<PlanTier, PlanConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
	#[serde(default)]
	pub description: Option<Box<str>>,
	/// Keyed by flag wire name (`emailSync`); unknown names are an error
	#[serde(default)]
	pub features: BTreeMap<Feature, bool>,
}

fn default_fallback() -> PlanTier {
	PlanTier::Free
}

impl PlanTableConfig {
	pub fn into_registry(self) -> VzResult<FrozenPlanRegistry> {
		let mut registry = PlanRegistry::new();
		for (tier, plan) in self.tiers {
			let description = plan.description.unwrap_or_else(|| tier.as_str().into());
			let features = plan
				.features
				.into_iter()
				.fold(FeaturesPatch::default(), |patch, (feature, on)| patch.with(feature, on));
			registry.register(
				PlanDefinition::builder(tier).description(description).features(features).build()?,
			)?;
		}
		registry.set_fallback(self.fallback);
		registry.freeze()
	}
}


// vim: ts=4
