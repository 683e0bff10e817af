use sha2::{Digest, Sha256};

use crate::settings::EntityCatalog;

/// Digest of everything a parsed snapshot depends on: the config bytes and
/// the catalog the entity names were checked against.
pub(crate) fn hash_config_inputs(bytes: &[u8], catalog: &EntityCatalog) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    for entity_type in catalog.iter() {
        hasher.update([0u8]);
        hasher.update(entity_type.as_str().as_bytes());
    }
    to_hex_lower(&hasher.finalize())
}

fn to_hex_lower(bytes: &[u8]) -> String {
    let mut output = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write as _;
        let _ = write!(&mut output, "{byte:02x}");
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lower_hex_and_content_sensitive() {
        let catalog = EntityCatalog::vanilla();
        let a = hash_config_inputs(b"{}", &catalog);
        let b = hash_config_inputs(b"{ }", &catalog);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|ch| ch.is_ascii_hexdigit() && !ch.is_ascii_uppercase()));
        assert_ne!(a, b);
        assert_eq!(a, hash_config_inputs(b"{}", &catalog));
    }

    #[test]
    fn digest_changes_with_catalog() {
        let vanilla = hash_config_inputs(b"{}", &EntityCatalog::vanilla());
        let modded = hash_config_inputs(b"{}", &EntityCatalog::from_names(["GOBLIN"]));
        let modded_again = hash_config_inputs(b"{}", &EntityCatalog::from_names([" goblin "]));
        assert_ne!(vanilla, modded);
        assert_eq!(modded, modded_again);
    }
}
