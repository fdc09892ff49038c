use std::{env, path, process::ExitCode, sync::Arc};
use tracing_subscriber::EnvFilter;

use ventazo_storage_adapter_redb::StorageAdapterRedb;
use ventazo_tenant::prelude::*;
use ventazo_tenant::{StoreConfig, TenantSettingsPatch, TenantSettingsStore};

const USAGE: &str = "usage: ventazo-basic-cli <show | set-tenant <tenant.json> | clear-tenant | has <tenant.json> <feature> | update <patch.json>>";

pub struct Config {
	pub db_dir: path::PathBuf,
	pub config_file: Option<path::PathBuf>,
}

enum Command {
	Show,
	SetTenant(path::PathBuf),
	ClearTenant,
	/// Feature flags are never persisted, so the tenant is resolved first
	Has(path::PathBuf, String),
	Update(path::PathBuf),
}

impl Command {
	fn parse(args: impl Iterator<Item = String>) -> VzResult<Self> {
		let args: Vec<String> = args.collect();
		let args: Vec<&str> = args.iter().map(String::as_str).collect();
		let command = match args.as_slice() {
			[] | ["show"] => Command::Show,
			["set-tenant", file] => Command::SetTenant((*file).into()),
			["clear-tenant"] => Command::ClearTenant,
			["has", file, feature] => Command::Has((*file).into(), (*feature).to_string()),
			["update", file] => Command::Update((*file).into()),
			_ => return Err(Error::ValidationError(USAGE.into())),
		};
		Ok(command)
	}
}

fn open_store(config: &Config) -> VzResult<TenantSettingsStore> {
	let mut store_config = match &config.config_file {
		Some(file) => StoreConfig::from_yaml_file(file)?,
		None => StoreConfig::default(),
	};
	store_config.apply_env();

	let storage = Arc::new(StorageAdapterRedb::new(config.db_dir.join("settings.redb"))?);
	TenantSettingsStore::builder().config(store_config).storage(storage).build()
}

fn read_json<T: serde::de::DeserializeOwned>(file: &path::Path) -> VzResult<T> {
	let data = std::fs::read_to_string(file)?;
	Ok(serde_json::from_str(&data)?)
}

/// Resolve the tenant in `file` and look up `feature` in its settings
fn tenant_has_feature(store: &TenantSettingsStore, file: &path::Path, feature: &str) -> VzResult<bool> {
	let tenant: Tenant = read_json(file)?;
	store.set_tenant(Some(tenant));
	Ok(store.has_feature(feature))
}

fn print_settings(store: &TenantSettingsStore) -> VzResult<()> {
	println!("{}", serde_json::to_string_pretty(&store.settings())?);
	Ok(())
}

fn run(config: &Config, command: Command) -> VzResult<()> {
	let store = open_store(config)?;

	match command {
		Command::Show => print_settings(&store)?,
		Command::SetTenant(file) => {
			let tenant: Tenant = read_json(&file)?;
			info!("Setting tenant {} (plan: {})", tenant.id, tenant.plan);
			store.set_tenant(Some(tenant));
			print_settings(&store)?;
		}
		Command::ClearTenant => {
			store.clear_tenant();
			print_settings(&store)?;
		}
		Command::Has(file, feature) => println!("{}", tenant_has_feature(&store, &file, &feature)?),
		Command::Update(file) => {
			let patch: TenantSettingsPatch = read_json(&file)?;
			store.update_settings(patch);
			print_settings(&store)?;
		}
	}

	Ok(())
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_target(false)
		.init();

	let config = Config {
		db_dir: path::PathBuf::from(env::var("DB_DIR").unwrap_or("./data".to_string())),
		config_file: env::var_os("VENTAZO_CONFIG").map(path::PathBuf::from),
	};

	let res = Command::parse(env::args().skip(1)).and_then(|command| run(&config, command));
	match res {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			error!("{}", err);
			eprintln!("{}", err);
			ExitCode::FAILURE
		}
	}
}


// vim: ts=4
