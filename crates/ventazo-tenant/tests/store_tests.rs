//! Tenant settings store behavior
//!
//! Covers plan resolution, tenant overrides, partial updates, clearing, and
//! what survives a reload through storage.

use std::sync::Arc;

use ventazo_tenant::persist::PersistedSettings;
use ventazo_tenant::{
	Feature, FeaturesPatch, FrozenPlanRegistry, InMemoryStorage, Patch, PlanTier, StorageAdapter,
	Tenant, TenantFeatures, TenantSettings, TenantSettingsPatch, TenantSettingsStore,
};

const KEY: &str = "ventazo-tenant-settings";

/// Route store logs to the test output (run with `--nocapture` to see them)
fn setup_test_logging() {
	let _ = tracing_subscriber::fmt()
		.with_test_writer()
		.with_max_level(tracing::Level::DEBUG)
		.try_init();
}

fn create_store() -> (TenantSettingsStore, Arc<InMemoryStorage>) {
	setup_test_logging();
	let storage = Arc::new(InMemoryStorage::new());
	let store = TenantSettingsStore::builder()
		.storage(storage.clone())
		.build()
		.expect("Failed to build store");
	(store, storage)
}

fn reload(storage: &Arc<InMemoryStorage>) -> TenantSettingsStore {
	TenantSettingsStore::builder()
		.storage(storage.clone())
		.build()
		.expect("Failed to rebuild store")
}

/// Plan baseline: defaults with the plan's feature overlay
fn baseline(plan: PlanTier) -> TenantSettings {
	let plans = FrozenPlanRegistry::builtin().expect("Failed to build plan table");
	let features = plans.get(plan).expect("Plan missing").features;
	TenantSettings { features: TenantFeatures::default().overlay(&features), ..Default::default() }
}

#[test]
fn test_starts_with_defaults() {
	let (store, storage) = create_store();

	assert_eq!(store.tenant(), None);
	assert_eq!(store.settings(), TenantSettings::default());
	assert!(storage.read(KEY).unwrap().is_none());
}

#[test]
fn test_scenario_pro_override_then_clear() {
	let (store, _storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "pro")));
	assert!(store.has_feature("whatsapp"));

	store.set_tenant(Some(Tenant::new("t1", "pro").with_settings(TenantSettingsPatch {
		currency: Some("USD".into()),
		..Default::default()
	})));
	let settings = store.settings();
	assert_eq!(&*settings.currency, "USD");
	assert_eq!(&*settings.locale, "es-MX");

	store.clear_tenant();
	assert_eq!(&*store.settings().currency, "MXN");
	assert!(!store.has_feature("whatsapp"));
}

#[test]
fn test_every_plan_yields_its_table_entry() {
	let (store, _storage) = create_store();

	for plan in PlanTier::ALL {
		store.set_tenant(Some(Tenant::new("t1", plan.as_str())));
		assert_eq!(store.settings(), baseline(plan), "plan {}", plan);
		assert_eq!(store.tenant().map(|t| t.plan), Some(plan.as_str().into()));
	}
}

#[test]
fn test_unknown_plan_matches_free() {
	let (store, _storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "enterprise")));
	store.set_tenant(Some(Tenant::new("t1", "diamond")));

	assert_eq!(store.features(), baseline(PlanTier::Free).features);
	assert_eq!(store.tenant().map(|t| t.plan), Some("diamond".into()));
}

#[test]
fn test_override_subsets_only_change_supplied_fields() {
	let (store, _storage) = create_store();
	let base = baseline(PlanTier::Starter);

	// bit i of the mask selects the i-th override field
	for mask in 0u8..64 {
		let mut ovr = TenantSettingsPatch::default();
		let mut expected = base.clone();
		if mask & 1 != 0 {
			ovr.currency = Some("USD".into());
			expected.currency = "USD".into();
		}
		if mask & 2 != 0 {
			ovr.locale = Some("en-US".into());
			expected.locale = "en-US".into();
		}
		if mask & 4 != 0 {
			ovr.timezone = Some("America/Bogota".into());
			expected.timezone = "America/Bogota".into();
		}
		if mask & 8 != 0 {
			ovr.date_format = Some("MM/DD/YYYY".into());
			expected.date_format = "MM/DD/YYYY".into();
		}
		if mask & 16 != 0 {
			ovr.primary_color = Patch::Value("#10b981".into());
			expected.primary_color = Some("#10b981".into());
		}
		if mask & 32 != 0 {
			ovr.logo = Patch::Value("https://cdn.example.com/t1.png".into());
			expected.logo = Some("https://cdn.example.com/t1.png".into());
		}

		store.clear_tenant();
		store.set_tenant(Some(Tenant::new("t1", "starter").with_settings(ovr)));
		assert_eq!(store.settings(), expected, "mask {:#08b}", mask);
	}
}

#[test]
fn test_blank_override_values_are_ignored() {
	let (store, _storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "pro").with_settings(TenantSettingsPatch {
		currency: Some("".into()),
		timezone: Some("  ".into()),
		logo: Patch::Value("".into()),
		..Default::default()
	})));

	assert_eq!(store.settings(), baseline(PlanTier::Pro));
}

#[test]
fn test_switching_tenant_drops_previous_branding() {
	let (store, _storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "pro").with_settings(TenantSettingsPatch {
		primary_color: Patch::Value("#7c3aed".into()),
		..Default::default()
	})));
	assert_eq!(store.settings().primary_color.as_deref(), Some("#7c3aed"));

	store.set_tenant(Some(Tenant::new("t2", "pro")));
	assert_eq!(store.settings().primary_color, None);
}

#[test]
fn test_null_tenant_keeps_settings() {
	let (store, _storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "enterprise")));
	let resolved = store.settings();

	store.set_tenant(None);
	assert_eq!(store.tenant(), None);
	assert_eq!(store.settings(), resolved);
	assert!(store.is_enabled(Feature::Workflows));
}

#[test]
fn test_update_single_flag() {
	let (store, _storage) = create_store();
	store.set_tenant(Some(Tenant::new("t1", "free").with_settings(TenantSettingsPatch {
		locale: Some("en-US".into()),
		..Default::default()
	})));
	store.update_settings(TenantSettingsPatch {
		currency: Some("EUR".into()),
		..Default::default()
	});
	let before = store.settings();

	store.update_settings(TenantSettingsPatch {
		features: Some(FeaturesPatch::default().with(Feature::Whatsapp, true)),
		..Default::default()
	});
	let after = store.settings();

	assert!(after.features.whatsapp);
	let mut expected = before.clone();
	expected.features.whatsapp = true;
	assert_eq!(after, expected);
	for feature in Feature::ALL.into_iter().filter(|f| *f != Feature::Whatsapp) {
		assert_eq!(after.features.get(feature), before.features.get(feature), "{}", feature);
	}
}

#[test]
fn test_update_leaves_omitted_fields() {
	let (store, _storage) = create_store();
	store.set_tenant(Some(Tenant::new("t1", "pro").with_settings(TenantSettingsPatch {
		logo: Patch::Value("https://cdn.example.com/t1.png".into()),
		..Default::default()
	})));
	let before = store.settings();

	store.update_settings(TenantSettingsPatch {
		timezone: Some("America/Monterrey".into()),
		..Default::default()
	});
	let after = store.settings();

	assert_eq!(&*after.timezone, "America/Monterrey");
	assert_eq!(after.logo, before.logo);
	assert_eq!(after.currency, before.currency);
	assert_eq!(after.features, before.features);

	store.update_settings(TenantSettingsPatch::default());
	assert_eq!(store.settings(), after);
}

#[test]
fn test_clear_always_yields_defaults() {
	let (store, _storage) = create_store();

	store.clear_tenant();
	assert_eq!(store.settings(), TenantSettings::default());

	store.set_tenant(Some(Tenant::new("t1", "enterprise").with_settings(TenantSettingsPatch {
		currency: Some("USD".into()),
		primary_color: Patch::Value("#14b8a6".into()),
		..Default::default()
	})));
	store.update_settings(TenantSettingsPatch {
		date_format: Some("YYYY-MM-DD".into()),
		features: Some(FeaturesPatch::default().with(Feature::CustomFields, false)),
		..Default::default()
	});
	store.set_tenant(None);

	store.clear_tenant();
	assert_eq!(store.tenant(), None);
	assert_eq!(store.settings(), TenantSettings::default());
}

#[test]
fn test_every_mutation_persists_durable_subset() {
	let (store, storage) = create_store();

	store.set_tenant(Some(Tenant::new("t1", "pro").with_settings(TenantSettingsPatch {
		locale: Some("en-US".into()),
		..Default::default()
	})));
	let stored = PersistedSettings::decode(&storage.read(KEY).unwrap().unwrap()).unwrap();
	assert_eq!(&*stored.locale, "en-US");

	store.update_settings(TenantSettingsPatch {
		currency: Some("USD".into()),
		..Default::default()
	});
	let stored = PersistedSettings::decode(&storage.read(KEY).unwrap().unwrap()).unwrap();
	assert_eq!(stored, PersistedSettings::from(&store.settings()));

	store.clear_tenant();
	let stored = PersistedSettings::decode(&storage.read(KEY).unwrap().unwrap()).unwrap();
	assert_eq!(stored, PersistedSettings::from(&TenantSettings::default()));
	assert_eq!(storage.len(), 1);
}

#[test]
fn test_persisted_record_has_exactly_four_fields() {
	let (store, storage) = create_store();
	store.set_tenant(Some(Tenant::new("t1", "enterprise").with_settings(TenantSettingsPatch {
		primary_color: Patch::Value("#10b981".into()),
		..Default::default()
	})));

	let raw = storage.read(KEY).unwrap().unwrap();
	let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
	let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
	keys.sort();
	assert_eq!(keys, vec!["currency", "dateFormat", "locale", "timezone"]);
}

#[test]
fn test_reload_restores_only_durable_subset() {
	let (store, storage) = create_store();
	store.set_tenant(Some(Tenant::new("t1", "enterprise").with_settings(TenantSettingsPatch {
		currency: Some("USD".into()),
		locale: Some("en-US".into()),
		logo: Patch::Value("https://cdn.example.com/t1.png".into()),
		..Default::default()
	})));
	store.update_settings(TenantSettingsPatch {
		timezone: Some("America/New_York".into()),
		date_format: Some("MM/DD/YYYY".into()),
		..Default::default()
	});
	drop(store);

	let store = reload(&storage);
	let settings = store.settings();
	assert_eq!(&*settings.currency, "USD");
	assert_eq!(&*settings.locale, "en-US");
	assert_eq!(&*settings.timezone, "America/New_York");
	assert_eq!(&*settings.date_format, "MM/DD/YYYY");

	assert_eq!(store.tenant(), None);
	assert_eq!(settings.features, TenantFeatures::default());
	assert_eq!(settings.logo, None);
	assert!(!store.has_feature("workflows"));
}

#[test]
fn test_set_tenant_after_reload_keeps_restored_values() {
	let (store, storage) = create_store();
	store.update_settings(TenantSettingsPatch {
		currency: Some("USD".into()),
		locale: Some("en-US".into()),
		..Default::default()
	});
	drop(store);

	let store = reload(&storage);
	store.set_tenant(Some(Tenant::new("t1", "pro")));

	let settings = store.settings();
	assert_eq!(&*settings.currency, "USD");
	assert_eq!(&*settings.locale, "en-US");
	assert!(store.has_feature("whatsapp"));

	let stored = PersistedSettings::decode(&storage.read(KEY).unwrap().unwrap()).unwrap();
	assert_eq!(&*stored.currency, "USD");
	assert_eq!(&*stored.locale, "en-US");
}

#[test]
fn test_refetching_tenant_keeps_runtime_updates() {
	let (store, _storage) = create_store();
	let tenant = Tenant::new("t1", "starter").with_settings(TenantSettingsPatch {
		locale: Some("en-US".into()),
		..Default::default()
	});
	store.set_tenant(Some(tenant.clone()));
	store.update_settings(TenantSettingsPatch {
		timezone: Some("America/Tijuana".into()),
		logo: Patch::Value("https://cdn.example.com/t1.png".into()),
		features: Some(FeaturesPatch::default().with(Feature::Workflows, true)),
		..Default::default()
	});

	store.set_tenant(Some(tenant));
	let settings = store.settings();
	assert_eq!(&*settings.timezone, "America/Tijuana");
	assert_eq!(&*settings.locale, "en-US");
	assert_eq!(settings.logo.as_deref(), Some("https://cdn.example.com/t1.png"));
	// entitlements always come back from the plan
	assert_eq!(settings.features, baseline(PlanTier::Starter).features);
}

#[test]
fn test_storage_key_is_configurable() {
	let storage = Arc::new(InMemoryStorage::new());
	let store = TenantSettingsStore::builder()
		.storage(storage.clone())
		.storage_key("tenant-a")
		.build()
		.expect("Failed to build store");

	store.update_settings(TenantSettingsPatch { locale: Some("pt-BR".into()), ..Default::default() });

	assert!(storage.read("tenant-a").unwrap().is_some());
	assert!(storage.read(KEY).unwrap().is_none());
}

#[test]
fn test_has_feature_unknown_name_is_false() {
	let (store, _storage) = create_store();
	store.set_tenant(Some(Tenant::new("t1", "enterprise")));

	assert!(store.has_feature("documentManagement"));
	assert!(!store.has_feature("teleportation"));
	assert!(!store.has_feature(""));
}

// vim: ts=4
