use std::collections::BTreeMap;
use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::document::{load_or_default, save_pretty};

/// Guild → moderation log channel. One shared map serves both the manual
/// moderation log and the automod alert channel.
#[derive(Debug)]
pub struct LogChannelStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, u64>>,
}

impl LogChannelStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    pub async fn get(&self, guild_id: u64) -> Option<u64> {
        let entries = self.entries.lock().await;
        entries.get(&guild_id.to_string()).copied()
    }

    pub async fn set(&self, guild_id: u64, channel_id: u64) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(guild_id.to_string(), channel_id);
        save_pretty(&self.path, &*entries).await
    }

    /// Returns whether a configured channel was actually removed.
    pub async fn clear(&self, guild_id: u64) -> anyhow::Result<bool> {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(&guild_id.to_string()).is_some();
        if removed {
            save_pretty(&self.path, &*entries).await?;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_clear_round_trip() {
        let path = std::env::temp_dir().join(format!("sable-logch-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = LogChannelStore::open(path.clone());
        assert_eq!(store.get(1).await, None);

        store.set(1, 555).await.unwrap();
        assert_eq!(store.get(1).await, Some(555));

        let reopened = LogChannelStore::open(path.clone());
        assert_eq!(reopened.get(1).await, Some(555));

        assert!(store.clear(1).await.unwrap());
        assert!(!store.clear(1).await.unwrap());
        assert_eq!(store.get(1).await, None);

        let _ = std::fs::remove_file(&path);
    }
}
