use serde::Serialize;

use crate::clamp::{clamp, diff, FieldWrite, ObservedSpawner};
use crate::settings::{to_sentinel, EntityType, Settings, SpawnerField, SpawnerValues};

/// What the `info` view shows for one spawner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoReport {
    pub world_name: String,
    pub entity_type: Option<EntityType>,
    pub allowed: bool,
    pub safety_caps_active: bool,
    pub observed: Option<ObservedSpawner>,
    pub resolved: SpawnerValues,
    pub effective: SpawnerValues,
    pub pending_writes: Vec<FieldWrite>,
}

impl InfoReport {
    pub fn build(
        settings: &Settings,
        world_name: &str,
        entity_type: Option<&EntityType>,
        observed: Option<ObservedSpawner>,
    ) -> Self {
        let allowed = settings.is_entity_allowed(entity_type);
        let resolved = settings.resolve(world_name, entity_type);
        let effective = clamp(&resolved, settings.disable_safety_caps());
        let pending_writes = match (&observed, allowed) {
            (Some(observed), true) => diff(&effective, observed).writes,
            _ => Vec::new(),
        };
        Self {
            world_name: world_name.to_string(),
            entity_type: entity_type.cloned(),
            allowed,
            safety_caps_active: !settings.disable_safety_caps(),
            observed,
            resolved,
            effective,
            pending_writes,
        }
    }

    pub fn render_human_readable(&self) -> String {
        let entity_label = self
            .entity_type
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string);
        let mut lines = vec![
            "--- SpawnerTweaks: info ---".to_string(),
            format!("World: {}", self.world_name),
            format!("EntityType: {entity_label}"),
            format!("Allowed by filters: {}", self.allowed),
            format!(
                "Safety caps active: {}",
                if self.safety_caps_active {
                    "true"
                } else {
                    "false (DISABLED)"
                }
            ),
        ];

        if let Some(observed) = &self.observed {
            lines.push("Current (live from block):".to_string());
            lines.push(format!(
                "  minSpawnDelay={} maxSpawnDelay={} spawnCount={}",
                observed.min_spawn_delay, observed.max_spawn_delay, observed.spawn_count
            ));
            lines.push(format!(
                "  maxNearbyEntities={} requiredPlayerRange={} spawnRange={}",
                observed.max_nearby_entities, observed.required_player_range, observed.spawn_range
            ));
        }

        lines.push("Effective config (before safety caps; -1 means unchanged):".to_string());
        push_values(&mut lines, &self.resolved);
        lines.push("After safety caps:".to_string());
        push_values(&mut lines, &self.effective);

        if self.observed.is_some() {
            if self.pending_writes.is_empty() {
                lines.push("Pending writes: none".to_string());
            } else {
                let writes = self
                    .pending_writes
                    .iter()
                    .map(|write| format!("{}={}", write.field, write.value))
                    .collect::<Vec<_>>()
                    .join(" ");
                lines.push(format!("Pending writes: {writes}"));
            }
        }
        lines.join("\n")
    }
}

fn push_values(lines: &mut Vec<String>, values: &SpawnerValues) {
    let show = |field: SpawnerField| format!("{}={}", field, to_sentinel(values.get(field)));
    lines.push(format!(
        "  {} {} {}",
        show(SpawnerField::MinSpawnDelay),
        show(SpawnerField::MaxSpawnDelay),
        show(SpawnerField::SpawnCount)
    ));
    lines.push(format!(
        "  {} {} {}",
        show(SpawnerField::MaxNearbyEntities),
        show(SpawnerField::RequiredPlayerRange),
        show(SpawnerField::SpawnRange)
    ));
    lines.push(format!("  {}", show(SpawnerField::SpawnCap)));
}
