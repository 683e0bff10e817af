use std::collections::BTreeSet;

use serde::Serialize;

use crate::settings::{SpawnerField, SpawnerValues};

pub const HARD_MIN_SPAWN_DELAY: u32 = 10; // ticks
pub const HARD_MAX_SPAWN_DELAY: u32 = 20; // ticks
pub const HARD_MAX_SPAWN_COUNT: u32 = 32;
pub const HARD_MAX_NEARBY: u32 = 64;
pub const HARD_MAX_PLAYER_RANGE: u32 = 64;
pub const HARD_MAX_SPAWN_RANGE: u32 = 32;

/// Fields a live spawner exposes, in the order they must be written.
/// Hosts reject a min delay above the current max, so max goes first.
pub const APPLY_ORDER: [SpawnerField; 6] = [
    SpawnerField::MaxSpawnDelay,
    SpawnerField::MinSpawnDelay,
    SpawnerField::MaxNearbyEntities,
    SpawnerField::SpawnCount,
    SpawnerField::RequiredPlayerRange,
    SpawnerField::SpawnRange,
];

/// Values currently held by a live spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedSpawner {
    pub min_spawn_delay: u32,
    pub max_spawn_delay: u32,
    pub spawn_count: u32,
    pub max_nearby_entities: u32,
    pub required_player_range: u32,
    pub spawn_range: u32,
}

impl ObservedSpawner {
    /// `None` for [`SpawnerField::SpawnCap`], which spawners do not carry.
    pub fn get(&self, field: SpawnerField) -> Option<u32> {
        match field {
            SpawnerField::MinSpawnDelay => Some(self.min_spawn_delay),
            SpawnerField::MaxSpawnDelay => Some(self.max_spawn_delay),
            SpawnerField::SpawnCount => Some(self.spawn_count),
            SpawnerField::SpawnCap => None,
            SpawnerField::MaxNearbyEntities => Some(self.max_nearby_entities),
            SpawnerField::RequiredPlayerRange => Some(self.required_player_range),
            SpawnerField::SpawnRange => Some(self.spawn_range),
        }
    }

    pub fn set(&mut self, field: SpawnerField, value: u32) {
        match field {
            SpawnerField::MinSpawnDelay => self.min_spawn_delay = value,
            SpawnerField::MaxSpawnDelay => self.max_spawn_delay = value,
            SpawnerField::SpawnCount => self.spawn_count = value,
            SpawnerField::SpawnCap => {}
            SpawnerField::MaxNearbyEntities => self.max_nearby_entities = value,
            SpawnerField::RequiredPlayerRange => self.required_player_range = value,
            SpawnerField::SpawnRange => self.spawn_range = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldWrite {
    pub field: SpawnerField,
    pub value: u32,
}

/// Effective values plus the writes needed to bring a spawner in line with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpawnerUpdate {
    pub effective: SpawnerValues,
    pub writes: Vec<FieldWrite>,
}

impl SpawnerUpdate {
    pub fn changed(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn touched(&self) -> BTreeSet<SpawnerField> {
        self.writes.iter().map(|write| write.field).collect()
    }

    pub fn apply_to(&self, observed: &mut ObservedSpawner) {
        for write in &self.writes {
            observed.set(write.field, write.value);
        }
    }
}

/// Applies the hard floors/ceilings. Unset fields stay unset and the spawn cap
/// is never bounded here.
pub fn clamp(resolved: &SpawnerValues, disable_safety_caps: bool) -> SpawnerValues {
    if disable_safety_caps {
        return *resolved;
    }
    SpawnerValues {
        min_spawn_delay: resolved.min_spawn_delay.map(|v| v.max(HARD_MIN_SPAWN_DELAY)),
        max_spawn_delay: resolved.max_spawn_delay.map(|v| v.max(HARD_MAX_SPAWN_DELAY)),
        spawn_count: resolved.spawn_count.map(|v| v.min(HARD_MAX_SPAWN_COUNT)),
        spawn_cap: resolved.spawn_cap,
        max_nearby_entities: resolved.max_nearby_entities.map(|v| v.min(HARD_MAX_NEARBY)),
        required_player_range: resolved
            .required_player_range
            .map(|v| v.min(HARD_MAX_PLAYER_RANGE)),
        spawn_range: resolved.spawn_range.map(|v| v.min(HARD_MAX_SPAWN_RANGE)),
    }
}

pub fn diff(effective: &SpawnerValues, observed: &ObservedSpawner) -> SpawnerUpdate {
    let writes = APPLY_ORDER
        .into_iter()
        .filter_map(|field| {
            let value = effective.get(field)?;
            (observed.get(field) != Some(value)).then_some(FieldWrite { field, value })
        })
        .collect();
    SpawnerUpdate {
        effective: *effective,
        writes,
    }
}
