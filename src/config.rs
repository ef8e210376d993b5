use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct DropConfig {
    /// Allow equipment drops with a maximum quantity above one to drop
    /// several copies per kill.
    pub use_multiple_same_equip_drop: bool,

    /// When a monster's drop list is already cached, empty the whole drop
    /// list cache and query the list again instead of returning it.
    pub reload_drops_on_cache_hit: bool,

    /// Seed for multi-equip quantity rolls, seeded from entropy when unset.
    pub rng_seed: Option<u64>,
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            use_multiple_same_equip_drop: false,
            reload_drops_on_cache_hit: true,
            rng_seed: None,
        }
    }
}

impl DropConfig {
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.to_string_lossy()))?;
        let config: Self = serde_json::from_str(&str).with_context(|| {
            format!(
                "Failed to deserialise DropConfig from file {}",
                path.to_string_lossy()
            )
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: DropConfig =
            serde_json::from_str(r#"{ "use_multiple_same_equip_drop": true }"#).unwrap();
        assert!(config.use_multiple_same_equip_drop);
        assert!(config.reload_drops_on_cache_hit);
        assert_eq!(config.rng_seed, None);
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drops.json");
        std::fs::write(
            &path,
            r#"{ "reload_drops_on_cache_hit": false, "rng_seed": 17 }"#,
        )
        .unwrap();

        let config = DropConfig::load(&path).unwrap();
        assert!(!config.use_multiple_same_equip_drop);
        assert!(!config.reload_drops_on_cache_hit);
        assert_eq!(config.rng_seed, Some(17));
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DropConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
