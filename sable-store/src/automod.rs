use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;
use tracing::warn;

use crate::document::{load_or_default, save_pretty, save_pretty_sync};

/// An automod preset as stored in the read-only presets table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutomodPreset {
    /// The fixed platform rule name the preset is upserted under.
    pub rule_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub regex_patterns: Vec<String>,
    #[serde(default)]
    pub keyword_filter: Vec<String>,
    #[serde(default)]
    pub allowed_keywords: Vec<String>,
}

/// SHA-256 over the canonical JSON form of a preset.
///
/// `serde_json::Value` maps keep their keys sorted, so the serialized form
/// is stable across field order and process restarts; equal presets always
/// hash equal, which is what the drift job compares against.
pub fn hash_preset(preset: &AutomodPreset) -> anyhow::Result<String> {
    let canonical = serde_json::to_value(preset)?;
    let payload = serde_json::to_string(&canonical)?;
    let digest = Sha256::digest(payload.as_bytes());

    Ok(digest.iter().map(|byte| format!("{byte:02x}")).collect())
}

/// Read-only preset table, loaded once at startup and seeded with the
/// built-in presets when the file does not exist yet.
#[derive(Debug, Default)]
pub struct PresetStore {
    presets: BTreeMap<String, AutomodPreset>,
}

impl PresetStore {
    pub fn open(path: &Path) -> Self {
        let mut presets: BTreeMap<String, AutomodPreset> = load_or_default(path);
        if presets.is_empty() {
            presets = default_presets();
            if let Err(source) = save_pretty_sync(path, &presets) {
                warn!(?source, "failed to seed the automod preset table");
            }
        }

        Self { presets }
    }

    pub fn get(&self, name: &str) -> Option<&AutomodPreset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }
}

fn default_presets() -> BTreeMap<String, AutomodPreset> {
    let mut presets = BTreeMap::new();
    presets.insert(
        "strict".to_owned(),
        AutomodPreset {
            rule_name: "Sable Filter".to_owned(),
            description: "Blocks slurs, invite links and zalgo flooding.".to_owned(),
            regex_patterns: vec![
                r"(?i)discord\.gg/\w+".to_owned(),
                r"[̀-ͯ]{5,}".to_owned(),
            ],
            keyword_filter: vec!["*slur1*".to_owned(), "*slur2*".to_owned()],
            allowed_keywords: Vec::new(),
        },
    );
    presets.insert(
        "lenient".to_owned(),
        AutomodPreset {
            rule_name: "Sable Filter".to_owned(),
            description: "Blocks slurs only.".to_owned(),
            regex_patterns: Vec::new(),
            keyword_filter: vec!["*slur1*".to_owned(), "*slur2*".to_owned()],
            allowed_keywords: vec!["classic".to_owned()],
        },
    );
    presets
}

/// What a guild currently has applied, keyed by guild id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedPreset {
    pub preset: String,
    pub hash: String,
}

#[derive(Debug)]
pub struct AppliedPresetStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, AppliedPreset>>,
}

impl AppliedPresetStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    pub async fn get(&self, guild_id: u64) -> Option<AppliedPreset> {
        let entries = self.entries.lock().await;
        entries.get(&guild_id.to_string()).cloned()
    }

    pub async fn set(&self, guild_id: u64, applied: AppliedPreset) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(guild_id.to_string(), applied);
        save_pretty(&self.path, &*entries).await
    }

    pub async fn clear(&self, guild_id: u64) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(&guild_id.to_string()).is_some();
        if removed {
            save_pretty(&self.path, &*entries).await?;
        }

        Ok(removed)
    }

    /// Snapshot of every guild's applied preset, for the drift sweep.
    pub async fn all(&self) -> Vec<(u64, AppliedPreset)> {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter_map(|(guild_key, applied)| {
                guild_key
                    .parse::<u64>()
                    .ok()
                    .map(|guild_id| (guild_id, applied.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset() -> AutomodPreset {
        AutomodPreset {
            rule_name: "Sable Filter".to_owned(),
            description: "test".to_owned(),
            regex_patterns: vec!["a+".to_owned()],
            keyword_filter: vec!["bad".to_owned()],
            allowed_keywords: vec!["badge".to_owned()],
        }
    }

    #[test]
    fn equal_presets_hash_equal() {
        let first = hash_preset(&preset()).unwrap();
        let second = hash_preset(&preset().clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn changed_content_changes_the_hash() {
        let base = hash_preset(&preset()).unwrap();

        let mut edited = preset();
        edited.keyword_filter.push("worse".to_owned());
        assert_ne!(base, hash_preset(&edited).unwrap());
    }

    #[test]
    fn preset_table_seeds_defaults() {
        let path = std::env::temp_dir().join(format!("sable-ampres-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = PresetStore::open(&path);
        assert!(store.get("strict").is_some());
        assert!(store.names().count() >= 2);
        assert!(path.exists());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn applied_presets_round_trip() {
        let path = std::env::temp_dir().join(format!("sable-applied-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = AppliedPresetStore::open(path.clone());
        let applied = AppliedPreset {
            preset: "strict".to_owned(),
            hash: hash_preset(&preset()).unwrap(),
        };
        store.set(1, applied.clone()).await.unwrap();

        assert_eq!(store.get(1).await, Some(applied.clone()));
        assert_eq!(store.all().await, vec![(1, applied)]);

        assert!(store.clear(1).await.unwrap());
        assert_eq!(store.get(1).await, None);

        let _ = std::fs::remove_file(&path);
    }
}
