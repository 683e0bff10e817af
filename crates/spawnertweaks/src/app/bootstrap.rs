use std::env;

use spawner_core::{resolve_config_path, EntityCatalog};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const EXTRA_ENTITY_TYPES_ENV_VAR: &str = "SPAWNERTWEAKS_EXTRA_ENTITY_TYPES";

pub(crate) struct AppWiring {
    pub(crate) args: Vec<String>,
    pub(crate) default_config_path: std::path::PathBuf,
    pub(crate) catalog: EntityCatalog,
}

pub(crate) fn build_app() -> AppWiring {
    init_tracing();
    info!(version = env!("CARGO_PKG_VERSION"), "spawnertweaks_startup");

    let default_config_path = match resolve_config_path() {
        Ok(path) => path,
        Err(error) => {
            warn!(error = %error, "config_path_env_unreadable");
            spawner_core::DEFAULT_CONFIG_FILE_NAME.into()
        }
    };

    AppWiring {
        args: env::args().skip(1).collect(),
        default_config_path,
        catalog: build_catalog(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Stock mob types plus any non-mob or modded ones listed in the environment.
fn build_catalog() -> EntityCatalog {
    let extra = parse_extra_entity_types(env::var(EXTRA_ENTITY_TYPES_ENV_VAR).ok().as_deref());
    if extra.is_empty() {
        return EntityCatalog::vanilla();
    }
    info!(count = extra.len(), "extra_entity_types_registered");
    EntityCatalog::vanilla().extended(extra)
}

fn parse_extra_entity_types(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect::<Vec<_>>()
    })
    .unwrap_or_default()
}
