use std::collections::{HashMap, HashSet};

use crate::clamp::{clamp, diff, ObservedSpawner, SpawnerUpdate};

use super::entity::EntityType;
use super::values::{to_sentinel, SpawnerField, SpawnerValues};

/// An immutable configuration snapshot. Build a new one to change anything.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub(crate) defaults: SpawnerValues,
    pub(crate) per_world: HashMap<String, SpawnerValues>,
    pub(crate) per_entity: HashMap<EntityType, SpawnerValues>,
    pub(crate) whitelist: HashSet<EntityType>,
    pub(crate) blacklist: HashSet<EntityType>,
    pub(crate) disable_safety_caps: bool,
    pub(crate) disable_spawn_caps: bool,
}

impl Settings {
    pub fn builder() -> SettingsBuilder {
        SettingsBuilder::default()
    }

    pub fn defaults(&self) -> &SpawnerValues {
        &self.defaults
    }

    pub fn per_world(&self) -> &HashMap<String, SpawnerValues> {
        &self.per_world
    }

    pub fn per_entity(&self) -> &HashMap<EntityType, SpawnerValues> {
        &self.per_entity
    }

    pub fn whitelist(&self) -> &HashSet<EntityType> {
        &self.whitelist
    }

    pub fn blacklist(&self) -> &HashSet<EntityType> {
        &self.blacklist
    }

    pub fn disable_safety_caps(&self) -> bool {
        self.disable_safety_caps
    }

    /// Carried through from configuration; nothing in this crate acts on it.
    pub fn disable_spawn_caps(&self) -> bool {
        self.disable_spawn_caps
    }

    /// Field-wise merge, most specific tier first: per-entity, per-world, defaults.
    pub fn resolve(&self, world_name: &str, entity_type: Option<&EntityType>) -> SpawnerValues {
        let tiers = self.tiers(world_name, entity_type);
        SpawnerField::ALL
            .into_iter()
            .fold(SpawnerValues::UNSET, |merged, field| {
                merged.with(field, pick(&tiers, field))
            })
    }

    pub fn resolve_spawn_cap(
        &self,
        world_name: &str,
        entity_type: Option<&EntityType>,
    ) -> Option<u32> {
        pick(&self.tiers(world_name, entity_type), SpawnerField::SpawnCap)
    }

    /// `-1` means no tier configures a spawn cap.
    pub fn spawn_cap(&self, world_name: &str, entity_type: Option<&EntityType>) -> i64 {
        to_sentinel(self.resolve_spawn_cap(world_name, entity_type))
    }

    pub fn is_entity_allowed(&self, entity_type: Option<&EntityType>) -> bool {
        let Some(entity_type) = entity_type else {
            return false;
        };
        if !self.whitelist.is_empty() && !self.whitelist.contains(entity_type) {
            return false;
        }
        !self.blacklist.contains(entity_type)
    }

    /// Filter, resolve, clamp and diff against what the spawner currently holds.
    /// `None` means the entity type is filtered out and nothing should be written.
    pub fn plan_update(
        &self,
        world_name: &str,
        entity_type: Option<&EntityType>,
        observed: &ObservedSpawner,
    ) -> Option<SpawnerUpdate> {
        if !self.is_entity_allowed(entity_type) {
            return None;
        }
        let resolved = self.resolve(world_name, entity_type);
        let effective = clamp(&resolved, self.disable_safety_caps);
        Some(diff(&effective, observed))
    }

    fn tiers(
        &self,
        world_name: &str,
        entity_type: Option<&EntityType>,
    ) -> [Option<&SpawnerValues>; 3] {
        [
            entity_type.and_then(|entity_type| self.per_entity.get(entity_type)),
            self.per_world.get(world_name),
            Some(&self.defaults),
        ]
    }
}

fn pick(tiers: &[Option<&SpawnerValues>], field: SpawnerField) -> Option<u32> {
    tiers
        .iter()
        .flatten()
        .find_map(|values| values.get(field))
}

/// Programmatic construction, mostly for hosts that do not read JSON.
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    pub fn defaults(mut self, values: SpawnerValues) -> Self {
        self.settings.defaults = values;
        self
    }

    pub fn world(mut self, world_name: impl Into<String>, values: SpawnerValues) -> Self {
        self.settings.per_world.insert(world_name.into(), values);
        self
    }

    pub fn entity(mut self, entity_type: EntityType, values: SpawnerValues) -> Self {
        self.settings.per_entity.insert(entity_type, values);
        self
    }

    pub fn whitelist(mut self, entity_types: impl IntoIterator<Item = EntityType>) -> Self {
        self.settings.whitelist.extend(entity_types);
        self
    }

    pub fn blacklist(mut self, entity_types: impl IntoIterator<Item = EntityType>) -> Self {
        self.settings.blacklist.extend(entity_types);
        self
    }

    pub fn disable_safety_caps(mut self, disabled: bool) -> Self {
        self.settings.disable_safety_caps = disabled;
        self
    }

    pub fn disable_spawn_caps(mut self, disabled: bool) -> Self {
        self.settings.disable_spawn_caps = disabled;
        self
    }

    pub fn build(self) -> Settings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EntityCatalog;

    fn ty(name: &str) -> EntityType {
        EntityCatalog::vanilla().parse(name).expect("known entity type")
    }

    fn only(field: SpawnerField, value: u32) -> SpawnerValues {
        SpawnerValues::UNSET.with(field, Some(value))
    }

    fn tiered(
        field: SpawnerField,
        entity: Option<u32>,
        world: Option<u32>,
        default: Option<u32>,
    ) -> Settings {
        Settings::builder()
            .defaults(SpawnerValues::UNSET.with(field, default))
            .world("world", SpawnerValues::UNSET.with(field, world))
            .entity(ty("ZOMBIE"), SpawnerValues::UNSET.with(field, entity))
            .build()
    }

    #[test]
    fn per_entity_wins_for_every_field() {
        for field in SpawnerField::ALL {
            let settings = tiered(field, Some(3), Some(2), Some(1));
            let resolved = settings.resolve("world", Some(&ty("ZOMBIE")));
            assert_eq!(resolved.get(field), Some(3), "field={field}");
        }
    }

    #[test]
    fn per_world_used_when_entity_unset() {
        for field in SpawnerField::ALL {
            let settings = tiered(field, None, Some(2), Some(1));
            let resolved = settings.resolve("world", Some(&ty("ZOMBIE")));
            assert_eq!(resolved.get(field), Some(2), "field={field}");
        }
    }

    #[test]
    fn defaults_used_when_both_specific_tiers_unset() {
        for field in SpawnerField::ALL {
            let settings = tiered(field, None, None, Some(1));
            assert_eq!(
                settings.resolve("world", Some(&ty("ZOMBIE"))).get(field),
                Some(1)
            );
            let settings = tiered(field, None, None, None);
            assert_eq!(settings.resolve("world", Some(&ty("ZOMBIE"))).get(field), None);
        }
    }

    #[test]
    fn override_is_field_wise_not_whole_record() {
        let settings = Settings::builder()
            .defaults(SpawnerValues::from_sentinels([200, 800, 4, -1, 6, 16, 4]))
            .world("nether", SpawnerValues::from_sentinels([100, 400, -1, -1, -1, 24, -1]))
            .entity(ty("BLAZE"), only(SpawnerField::SpawnCount, 2))
            .build();

        let resolved = settings.resolve("nether", Some(&ty("BLAZE")));
        assert_eq!(resolved.to_sentinels(), [100, 400, 2, -1, 6, 24, 4]);
    }

    #[test]
    fn unknown_world_and_type_fall_through() {
        let settings = Settings::builder()
            .defaults(only(SpawnerField::SpawnRange, 4))
            .world("world", only(SpawnerField::SpawnRange, 8))
            .entity(ty("ZOMBIE"), only(SpawnerField::SpawnRange, 12))
            .build();

        assert_eq!(
            settings.resolve("elsewhere", Some(&ty("SKELETON"))).spawn_range,
            Some(4)
        );
        assert_eq!(settings.resolve("world", None).spawn_range, Some(8));
        assert_eq!(settings.resolve("elsewhere", None).spawn_range, Some(4));
    }

    #[test]
    fn spawn_cap_follows_tiers_and_may_be_unset() {
        let settings = Settings::builder()
            .world("world", only(SpawnerField::SpawnCap, 6))
            .entity(ty("SPIDER"), only(SpawnerField::SpawnCap, 2))
            .build();

        assert_eq!(settings.spawn_cap("world", Some(&ty("SPIDER"))), 2);
        assert_eq!(settings.spawn_cap("world", Some(&ty("ZOMBIE"))), 6);
        assert_eq!(settings.spawn_cap("end", Some(&ty("ZOMBIE"))), -1);
        assert_eq!(settings.resolve_spawn_cap("end", None), None);
    }

    #[test]
    fn absent_entity_type_is_never_allowed() {
        assert!(!Settings::default().is_entity_allowed(None));
    }

    #[test]
    fn blacklist_rejects_with_empty_whitelist() {
        let settings = Settings::builder().blacklist([ty("CREEPER")]).build();
        assert!(!settings.is_entity_allowed(Some(&ty("CREEPER"))));
        assert!(settings.is_entity_allowed(Some(&ty("ZOMBIE"))));
    }

    #[test]
    fn whitelist_restricts_when_present() {
        let settings = Settings::builder().whitelist([ty("ZOMBIE")]).build();
        assert!(settings.is_entity_allowed(Some(&ty("ZOMBIE"))));
        assert!(!settings.is_entity_allowed(Some(&ty("CREEPER"))));
    }

    #[test]
    fn blacklist_wins_over_whitelist_membership() {
        let settings = Settings::builder()
            .whitelist([ty("ZOMBIE"), ty("SKELETON")])
            .blacklist([ty("ZOMBIE")])
            .build();
        assert!(!settings.is_entity_allowed(Some(&ty("ZOMBIE"))));
        assert!(settings.is_entity_allowed(Some(&ty("SKELETON"))));
    }

    #[test]
    fn plan_update_skips_filtered_types() {
        let settings = Settings::builder()
            .defaults(only(SpawnerField::SpawnCount, 4))
            .blacklist([ty("CREEPER")])
            .build();
        let observed = ObservedSpawner::default();
        assert!(settings
            .plan_update("world", Some(&ty("CREEPER")), &observed)
            .is_none());
        let update = settings
            .plan_update("world", Some(&ty("ZOMBIE")), &observed)
            .expect("zombie allowed");
        assert!(update.changed());
    }
}
