use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use super::entity::{EntityCatalog, EntityType};
use super::store::Settings;
use super::values::{sentinel_from_raw, SpawnerField, SpawnerValues};

pub const DEFAULTS_KEY: &str = "defaults";
pub const PER_WORLD_KEY: &str = "perWorld";
pub const PER_ENTITY_KEY: &str = "perEntity";
pub const FILTERS_KEY: &str = "filters";
pub const WHITELIST_KEY: &str = "whitelist";
pub const BLACKLIST_KEY: &str = "blacklist";
pub const DISABLE_SAFETY_CAPS_KEY: &str = "disable-safety-caps";
pub const DISABLE_SPAWN_CAPS_KEY: &str = "disable-spawn-caps";

#[derive(Debug, Error)]
#[error("configuration is not valid JSON: {0}")]
pub struct SettingsParseError(#[from] pub serde_json::Error);

impl Settings {
    /// Never fails: missing or mistyped sections degrade to "unset".
    pub fn from_config(raw: &Value, catalog: &EntityCatalog) -> Settings {
        let root = raw.as_object();
        let section = |key: &str| root.and_then(|root| root.get(key));

        let defaults = read_values(section(DEFAULTS_KEY));

        let per_world = section(PER_WORLD_KEY)
            .and_then(Value::as_object)
            .map(|worlds| {
                worlds
                    .iter()
                    .map(|(world, values)| (world.clone(), read_values(Some(values))))
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();

        let mut per_entity = HashMap::new();
        if let Some(entities) = section(PER_ENTITY_KEY).and_then(Value::as_object) {
            for (name, values) in entities {
                match catalog.parse(name) {
                    Some(entity_type) => {
                        per_entity.insert(entity_type, read_values(Some(values)));
                    }
                    None => warn!(
                        section = PER_ENTITY_KEY,
                        entity_type = %name,
                        "unknown_entity_type_dropped"
                    ),
                }
            }
        }

        let filters = section(FILTERS_KEY).and_then(Value::as_object);
        let whitelist = read_type_list(filters, WHITELIST_KEY, catalog);
        let blacklist = read_type_list(filters, BLACKLIST_KEY, catalog);

        Settings {
            defaults,
            per_world,
            per_entity,
            whitelist,
            blacklist,
            disable_safety_caps: read_bool(section(DISABLE_SAFETY_CAPS_KEY)),
            disable_spawn_caps: read_bool(section(DISABLE_SPAWN_CAPS_KEY)),
        }
    }

    pub fn from_json_str(
        raw: &str,
        catalog: &EntityCatalog,
    ) -> Result<Settings, SettingsParseError> {
        let value = serde_json::from_str::<Value>(raw)?;
        Ok(Self::from_config(&value, catalog))
    }
}

pub(crate) fn read_values(section: Option<&Value>) -> SpawnerValues {
    let Some(section) = section.and_then(Value::as_object) else {
        return SpawnerValues::UNSET;
    };
    SpawnerField::ALL
        .into_iter()
        .fold(SpawnerValues::UNSET, |values, field| {
            values.with(field, read_int(section, field.config_key()))
        })
}

fn read_int(section: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = section.get(key)?;
    let raw = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|float| float as i64))?,
        _ => return None,
    };
    sentinel_from_raw(raw)
}

fn read_bool(value: Option<&Value>) -> bool {
    value.and_then(Value::as_bool).unwrap_or(false)
}

fn read_type_list(
    filters: Option<&Map<String, Value>>,
    key: &'static str,
    catalog: &EntityCatalog,
) -> HashSet<EntityType> {
    let Some(entries) = filters
        .and_then(|filters| filters.get(key))
        .and_then(Value::as_array)
    else {
        return HashSet::new();
    };
    entries
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|name| {
            let parsed = catalog.parse(name);
            if parsed.is_none() {
                warn!(section = key, entity_type = %name, "unknown_entity_type_dropped");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn ty(name: &str) -> EntityType {
        EntityCatalog::vanilla().parse(name).expect("known entity type")
    }

    fn parse(raw: Value) -> Settings {
        Settings::from_config(&raw, &EntityCatalog::vanilla())
    }

    #[test]
    fn empty_config_resolves_all_unset_and_allows_everything() {
        for raw in [json!({}), json!(null), json!([1, 2, 3]), json!("config")] {
            let settings = parse(raw);
            assert!(settings.resolve("world", Some(&ty("ZOMBIE"))).is_unset());
            assert!(settings.resolve("nether", None).is_unset());
            assert!(settings.is_entity_allowed(Some(&ty("CREEPER"))));
            assert!(!settings.disable_safety_caps());
            assert!(!settings.disable_spawn_caps());
        }
    }

    #[test]
    fn reads_full_document() {
        let settings = parse(json!({
            "defaults": {
                "minSpawnDelay": 200, "maxSpawnDelay": 800, "spawnCount": 4,
                "spawnCap": -1, "maxNearbyEntities": 6, "requiredPlayerRange": 16, "spawnRange": 4
            },
            "perWorld": {
                "world_nether": { "spawnCount": 2 },
                "broken": 17
            },
            "perEntity": {
                " blaze ": { "spawnRange": 8 },
                "NOT_A_MOB": { "spawnRange": 1 }
            },
            "filters": { "whitelist": [], "blacklist": ["creeper", "NOT_A_MOB", 5] },
            "disable-safety-caps": true,
            "disable-spawn-caps": "yes"
        }));

        assert_eq!(settings.defaults().to_sentinels(), [200, 800, 4, -1, 6, 16, 4]);
        assert_eq!(settings.per_world().len(), 2);
        assert!(settings.per_world()["broken"].is_unset());
        assert_eq!(settings.per_entity().len(), 1);
        assert_eq!(settings.per_entity()[&ty("BLAZE")].spawn_range, Some(8));
        assert_eq!(settings.blacklist().len(), 1);
        assert!(settings.blacklist().contains(&ty("CREEPER")));
        assert!(settings.disable_safety_caps());
        assert!(!settings.disable_spawn_caps());

        let resolved = settings.resolve("world_nether", Some(&ty("BLAZE")));
        assert_eq!(resolved.to_sentinels(), [200, 800, 2, -1, 6, 16, 8]);
    }

    #[test]
    fn mistyped_fields_are_unset() {
        let values = read_values(Some(&json!({
            "minSpawnDelay": "20",
            "maxSpawnDelay": 40.9,
            "spawnCount": -5,
            "spawnCap": null,
            "maxNearbyEntities": true,
            "requiredPlayerRange": 99999999999i64,
            "spawnRange": [3]
        })));
        assert_eq!(values.to_sentinels(), [-1, 40, -1, -1, -1, -1, -1]);
    }

    #[test]
    fn unknown_whitelist_entry_leaves_whitelist_unrestricted() {
        let settings = parse(json!({ "filters": { "whitelist": ["NOT_A_MOB"] } }));
        assert!(settings.whitelist().is_empty());
        assert!(settings.is_entity_allowed(Some(&ty("ZOMBIE"))));
        assert!(settings.is_entity_allowed(Some(&ty("CREEPER"))));
    }

    #[test]
    fn whitelist_entries_are_case_insensitive() {
        let settings = parse(json!({ "filters": { "whitelist": ["Zombie", " skeleton"] } }));
        assert!(settings.is_entity_allowed(Some(&ty("ZOMBIE"))));
        assert!(settings.is_entity_allowed(Some(&ty("SKELETON"))));
        assert!(!settings.is_entity_allowed(Some(&ty("CREEPER"))));
    }

    #[test]
    fn colliding_entity_keys_keep_the_last_sorted_key() {
        let settings = parse(json!({
            "perEntity": {
                "zombie": { "spawnCount": 1 },
                "ZOMBIE": { "spawnCount": 2 }
            }
        }));
        assert_eq!(settings.per_entity().len(), 1);
        assert_eq!(
            settings.resolve("world", Some(&ty("ZOMBIE"))).spawn_count,
            Some(1)
        );

        let settings = Settings::from_json_str(
            r#"{"perEntity": {"zombie": {"spawnCount": 1}, "ZOMBIE": {"spawnCount": 2}}}"#,
            &EntityCatalog::vanilla(),
        )
        .expect("parse");
        assert_eq!(settings.per_entity()[&ty("ZOMBIE")].spawn_count, Some(1));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let error = Settings::from_json_str("{ defaults: ", &EntityCatalog::vanilla())
            .expect_err("syntax error");
        assert!(error.to_string().contains("not valid JSON"));
    }
}
