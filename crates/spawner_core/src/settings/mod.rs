mod config;
mod entity;
mod store;
mod values;

pub use config::{
    SettingsParseError, BLACKLIST_KEY, DEFAULTS_KEY, DISABLE_SAFETY_CAPS_KEY,
    DISABLE_SPAWN_CAPS_KEY, FILTERS_KEY, PER_ENTITY_KEY, PER_WORLD_KEY, WHITELIST_KEY,
};
pub use entity::{EntityCatalog, EntityType};
pub use store::{Settings, SettingsBuilder};
pub use values::{sentinel_from_raw, to_sentinel, SpawnerField, SpawnerValues};
