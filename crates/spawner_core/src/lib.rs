pub mod clamp;
mod handle;
mod loader;
mod report;
pub mod settings;
mod tweak;

pub use clamp::{
    clamp, diff, FieldWrite, ObservedSpawner, SpawnerUpdate, APPLY_ORDER, HARD_MAX_NEARBY,
    HARD_MAX_PLAYER_RANGE, HARD_MAX_SPAWN_COUNT, HARD_MAX_SPAWN_DELAY, HARD_MAX_SPAWN_RANGE,
    HARD_MIN_SPAWN_DELAY,
};
pub use handle::{ReloadOutcome, SettingsHandle};
pub use loader::{
    load_settings, resolve_config_path, save_default_config, LoadedSettings, SettingsLoadError,
    CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE_NAME, DEFAULT_CONFIG_JSON,
};
pub use report::InfoReport;
pub use settings::{
    EntityCatalog, EntityType, Settings, SettingsBuilder, SettingsParseError, SpawnerField,
    SpawnerValues,
};
pub use tweak::{tweak_all, tweak_spawner, LiveSpawner, SweepSummary, TweakOutcome, TweakReason};
