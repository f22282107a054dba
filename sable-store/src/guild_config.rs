use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::document::{load_or_default, save_pretty};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct ToggleFile {
    #[serde(rename = "Servers", default)]
    servers: BTreeMap<String, GuildToggles>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct GuildToggles {
    #[serde(rename = "DevOnly", default)]
    dev_only: BTreeMap<String, bool>,
    #[serde(rename = "UnderMaintenance", default)]
    under_maintenance: BTreeMap<String, bool>,
    #[serde(flatten)]
    enabled: BTreeMap<String, bool>,
}

/// Per-guild command on/off switches.
///
/// Commands default to enabled. A command listed under the maintenance
/// block is off for everyone regardless of its toggle or the listed value;
/// presence alone disables, matching the inherited file format.
#[derive(Debug)]
pub struct CommandToggleStore {
    path: PathBuf,
    entries: Mutex<ToggleFile>,
}

impl CommandToggleStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    pub async fn is_enabled(&self, guild_id: u64, command: &str) -> bool {
        let entries = self.entries.lock().await;
        let Some(guild) = entries.servers.get(&guild_id.to_string()) else {
            return true;
        };

        if guild.under_maintenance.contains_key(command) {
            return false;
        }

        guild.enabled.get(command).copied().unwrap_or(true)
    }

    pub async fn set_enabled(
        &self,
        guild_id: u64,
        command: &str,
        enabled: bool,
    ) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        entries
            .servers
            .entry(guild_id.to_string())
            .or_default()
            .enabled
            .insert(command.to_owned(), enabled);
        save_pretty(&self.path, &*entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn commands_default_to_enabled() {
        let path = std::env::temp_dir().join(format!("sable-toggles-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = CommandToggleStore::open(path.clone());
        assert!(store.is_enabled(1, "knockout").await);

        store.set_enabled(1, "knockout", false).await.unwrap();
        assert!(!store.is_enabled(1, "knockout").await);
        assert!(store.is_enabled(2, "knockout").await);

        store.set_enabled(1, "knockout", true).await.unwrap();
        assert!(store.is_enabled(1, "knockout").await);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn maintenance_overrides_the_toggle() {
        let path =
            std::env::temp_dir().join(format!("sable-toggles-mt-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);
        std::fs::write(
            &path,
            r#"{"Servers": {"1": {"UnderMaintenance": {"trivia": true, "dice": false}, "trivia": true}}}"#,
        )
        .unwrap();

        let store = CommandToggleStore::open(path.clone());
        assert!(!store.is_enabled(1, "trivia").await);
        // Listed at all means disabled, even with a false value.
        assert!(!store.is_enabled(1, "dice").await);
        assert!(store.is_enabled(1, "coinflip").await);

        let _ = std::fs::remove_file(&path);
    }
}
