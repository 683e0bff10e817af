use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

/// Living mob identifiers of the stock 1.20/1.21 server, in host spelling.
const VANILLA_ENTITY_TYPES: &[&str] = &[
    "ALLAY",
    "ARMADILLO",
    "AXOLOTL",
    "BAT",
    "BEE",
    "BLAZE",
    "BOGGED",
    "BREEZE",
    "CAMEL",
    "CAT",
    "CAVE_SPIDER",
    "CHICKEN",
    "COD",
    "COW",
    "CREAKING",
    "CREEPER",
    "DOLPHIN",
    "DONKEY",
    "DROWNED",
    "ELDER_GUARDIAN",
    "ENDERMAN",
    "ENDERMITE",
    "ENDER_DRAGON",
    "EVOKER",
    "FOX",
    "FROG",
    "GHAST",
    "GIANT",
    "GLOW_SQUID",
    "GOAT",
    "GUARDIAN",
    "HOGLIN",
    "HORSE",
    "HUSK",
    "ILLUSIONER",
    "IRON_GOLEM",
    "LLAMA",
    "MAGMA_CUBE",
    "MOOSHROOM",
    "MULE",
    "OCELOT",
    "PANDA",
    "PARROT",
    "PHANTOM",
    "PIG",
    "PIGLIN",
    "PIGLIN_BRUTE",
    "PILLAGER",
    "POLAR_BEAR",
    "PUFFERFISH",
    "RABBIT",
    "RAVAGER",
    "SALMON",
    "SHEEP",
    "SHULKER",
    "SILVERFISH",
    "SKELETON",
    "SKELETON_HORSE",
    "SLIME",
    "SNIFFER",
    "SNOW_GOLEM",
    "SPIDER",
    "SQUID",
    "STRAY",
    "STRIDER",
    "TADPOLE",
    "TRADER_LLAMA",
    "TROPICAL_FISH",
    "TURTLE",
    "VEX",
    "VILLAGER",
    "VINDICATOR",
    "WANDERING_TRADER",
    "WARDEN",
    "WITCH",
    "WITHER",
    "WITHER_SKELETON",
    "WOLF",
    "ZOGLIN",
    "ZOMBIE",
    "ZOMBIE_HORSE",
    "ZOMBIE_VILLAGER",
    "ZOMBIFIED_PIGLIN",
];

/// A known entity type, always in canonical (trimmed, uppercase) spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of entity types a host recognizes.
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    known: BTreeSet<String>,
}

impl EntityCatalog {
    /// Names are canonicalized on the way in; blank entries are ignored.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let known = names
            .into_iter()
            .filter_map(|name| canonical_name(name.as_ref()))
            .collect();
        Self { known }
    }

    /// Living mobs only. Non-mob host types (`ARMOR_STAND`, `MINECART`, ...)
    /// and modded types have to be added with [`EntityCatalog::extended`].
    pub fn vanilla() -> Self {
        Self::from_names(VANILLA_ENTITY_TYPES.iter().copied())
    }

    pub fn extended<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut known = self.known.clone();
        known.extend(
            extra
                .into_iter()
                .filter_map(|name| canonical_name(name.as_ref())),
        );
        Self { known }
    }

    pub fn parse(&self, raw: &str) -> Option<EntityType> {
        let canonical = canonical_name(raw)?;
        self.known
            .contains(&canonical)
            .then_some(EntityType(canonical))
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityType> + '_ {
        self.known.iter().cloned().map(EntityType)
    }
}

fn canonical_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_ascii_uppercase())
}
