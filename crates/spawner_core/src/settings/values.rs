use std::fmt;

use serde::Serialize;

/// One tunable of a mob spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SpawnerField {
    MinSpawnDelay,
    MaxSpawnDelay,
    SpawnCount,
    SpawnCap,
    MaxNearbyEntities,
    RequiredPlayerRange,
    SpawnRange,
}

impl SpawnerField {
    pub const ALL: [SpawnerField; 7] = [
        SpawnerField::MinSpawnDelay,
        SpawnerField::MaxSpawnDelay,
        SpawnerField::SpawnCount,
        SpawnerField::SpawnCap,
        SpawnerField::MaxNearbyEntities,
        SpawnerField::RequiredPlayerRange,
        SpawnerField::SpawnRange,
    ];

    pub fn config_key(self) -> &'static str {
        match self {
            SpawnerField::MinSpawnDelay => "minSpawnDelay",
            SpawnerField::MaxSpawnDelay => "maxSpawnDelay",
            SpawnerField::SpawnCount => "spawnCount",
            SpawnerField::SpawnCap => "spawnCap",
            SpawnerField::MaxNearbyEntities => "maxNearbyEntities",
            SpawnerField::RequiredPlayerRange => "requiredPlayerRange",
            SpawnerField::SpawnRange => "spawnRange",
        }
    }

    /// Case-insensitive lookup by configuration key.
    pub fn from_config_key(key: &str) -> Option<SpawnerField> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.config_key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for SpawnerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_key())
    }
}

/// A parameter set. `None` means "no value at this tier".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpawnerValues {
    pub min_spawn_delay: Option<u32>,
    pub max_spawn_delay: Option<u32>,
    pub spawn_count: Option<u32>,
    pub spawn_cap: Option<u32>,
    pub max_nearby_entities: Option<u32>,
    pub required_player_range: Option<u32>,
    pub spawn_range: Option<u32>,
}

impl SpawnerValues {
    pub const UNSET: SpawnerValues = SpawnerValues {
        min_spawn_delay: None,
        max_spawn_delay: None,
        spawn_count: None,
        spawn_cap: None,
        max_nearby_entities: None,
        required_player_range: None,
        spawn_range: None,
    };

    pub fn get(&self, field: SpawnerField) -> Option<u32> {
        match field {
            SpawnerField::MinSpawnDelay => self.min_spawn_delay,
            SpawnerField::MaxSpawnDelay => self.max_spawn_delay,
            SpawnerField::SpawnCount => self.spawn_count,
            SpawnerField::SpawnCap => self.spawn_cap,
            SpawnerField::MaxNearbyEntities => self.max_nearby_entities,
            SpawnerField::RequiredPlayerRange => self.required_player_range,
            SpawnerField::SpawnRange => self.spawn_range,
        }
    }

    #[must_use]
    pub fn with(mut self, field: SpawnerField, value: Option<u32>) -> Self {
        let slot = match field {
            SpawnerField::MinSpawnDelay => &mut self.min_spawn_delay,
            SpawnerField::MaxSpawnDelay => &mut self.max_spawn_delay,
            SpawnerField::SpawnCount => &mut self.spawn_count,
            SpawnerField::SpawnCap => &mut self.spawn_cap,
            SpawnerField::MaxNearbyEntities => &mut self.max_nearby_entities,
            SpawnerField::RequiredPlayerRange => &mut self.required_player_range,
            SpawnerField::SpawnRange => &mut self.spawn_range,
        };
        *slot = value;
        self
    }

    pub fn is_unset(&self) -> bool {
        SpawnerField::ALL
            .into_iter()
            .all(|field| self.get(field).is_none())
    }

    /// Builds a set from raw sentinel-encoded integers in [`SpawnerField::ALL`] order.
    pub fn from_sentinels(raw: [i64; 7]) -> Self {
        SpawnerField::ALL
            .into_iter()
            .zip(raw)
            .fold(Self::UNSET, |values, (field, value)| {
                values.with(field, sentinel_from_raw(value))
            })
    }

    pub fn to_sentinels(&self) -> [i64; 7] {
        SpawnerField::ALL.map(|field| to_sentinel(self.get(field)))
    }
}

/// Any negative input is "unset"; so is anything a spawner field cannot hold.
pub fn sentinel_from_raw(raw: i64) -> Option<u32> {
    if raw < 0 {
        return None;
    }
    u32::try_from(raw).ok()
}

pub fn to_sentinel(value: Option<u32>) -> i64 {
    value.map_or(-1, i64::from)
}
