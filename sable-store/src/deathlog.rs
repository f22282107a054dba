use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::document::{load_or_default, save_pretty};
use crate::time::parse_timestamp_lenient;

/// Who knocked a user out, with what, and until when.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeathlogEntry {
    pub by: u64,
    pub weapon: String,
    pub timeout_end: String,
    #[serde(default)]
    pub crit: bool,
}

/// User → active knockout, consumed by revives and swept when lapsed.
#[derive(Debug)]
pub struct DeathlogStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, DeathlogEntry>>,
}

impl DeathlogStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    pub async fn get(&self, user_id: u64) -> Option<DeathlogEntry> {
        let entries = self.entries.lock().await;
        entries.get(&user_id.to_string()).cloned()
    }

    pub async fn record(&self, user_id: u64, entry: DeathlogEntry) -> anyhow::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(user_id.to_string(), entry);
        save_pretty(&self.path, &*entries).await
    }

    /// Remove and return the entry; a successful revive consumes it.
    pub async fn take(&self, user_id: u64) -> anyhow::Result<Option<DeathlogEntry>> {
        let mut entries = self.entries.lock().await;
        let taken = entries.remove(&user_id.to_string());
        if taken.is_some() {
            save_pretty(&self.path, &*entries).await?;
        }

        Ok(taken)
    }

    /// Drop entries whose timeout has lapsed. Entries with an unreadable
    /// `timeout_end` are kept.
    pub async fn prune_lapsed(&self) -> anyhow::Result<usize> {
        let now = Utc::now();

        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| {
            parse_timestamp_lenient(&entry.timeout_end).is_none_or(|end| end > now)
        });

        let removed = before - entries.len();
        if removed > 0 {
            save_pretty(&self.path, &*entries).await?;
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;

    use super::*;

    fn entry(timeout_end: &str) -> DeathlogEntry {
        DeathlogEntry {
            by: 42,
            weapon: "pan".to_owned(),
            timeout_end: timeout_end.to_owned(),
            crit: false,
        }
    }

    #[tokio::test]
    async fn take_consumes_the_entry() {
        let path = std::env::temp_dir().join(format!("sable-deathlog-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = DeathlogStore::open(path.clone());
        store.record(1, entry("2999-01-01T00:00:00Z")).await.unwrap();

        assert!(store.get(1).await.is_some());
        assert!(store.take(1).await.unwrap().is_some());
        assert!(store.take(1).await.unwrap().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn prune_drops_lapsed_and_keeps_the_rest() {
        let path =
            std::env::temp_dir().join(format!("sable-deathlog-pr-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = DeathlogStore::open(path.clone());
        let past = (Utc::now() - ChronoDuration::hours(2)).to_rfc3339();
        let future = (Utc::now() + ChronoDuration::hours(2)).to_rfc3339();

        store.record(1, entry(&past)).await.unwrap();
        store.record(2, entry(&future)).await.unwrap();
        store.record(3, entry("mystery")).await.unwrap();

        assert_eq!(store.prune_lapsed().await.unwrap(), 1);
        assert!(store.get(1).await.is_none());
        assert!(store.get(2).await.is_some());
        assert!(store.get(3).await.is_some());

        let _ = std::fs::remove_file(&path);
    }
}
