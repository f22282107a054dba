use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::document::{load_or_default, save_pretty};
use crate::time::{now_iso8601, parse_timestamp_lenient};

/// One warning issued to a user, insertion-ordered within its list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WarningRecord {
    pub reason: String,
    pub moderator: String,
    pub timestamp: String,
}

/// A warning removed by the auto-expiry sweep.
#[derive(Clone, Debug)]
pub struct ExpiredWarning {
    pub guild_id: u64,
    pub user_id: u64,
    pub record: WarningRecord,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum WarningStoreError {
    #[error("no warnings recorded for this user")]
    NotFound,
    #[error("warning #{index} does not exist (this user has {count})")]
    IndexOutOfRange { index: usize, count: usize },
}

type WarningMap = BTreeMap<String, BTreeMap<String, Vec<WarningRecord>>>;

/// Guild → user → warning list, rewritten whole after every mutation.
///
/// Empty user lists and empty guild maps are pruned on every mutation path,
/// expiry included, so the document never accumulates dead keys.
#[derive(Debug)]
pub struct WarningStore {
    path: PathBuf,
    entries: Mutex<WarningMap>,
}

impl WarningStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    /// Append a warning stamped with the current UTC time.
    pub async fn warn(
        &self,
        guild_id: u64,
        user_id: u64,
        reason: &str,
        moderator: &str,
    ) -> anyhow::Result<WarningRecord> {
        let record = WarningRecord {
            reason: reason.to_owned(),
            moderator: moderator.to_owned(),
            timestamp: now_iso8601(),
        };
        self.append(guild_id, user_id, record).await
    }

    async fn append(
        &self,
        guild_id: u64,
        user_id: u64,
        record: WarningRecord,
    ) -> anyhow::Result<WarningRecord> {
        let mut entries = self.entries.lock().await;
        entries
            .entry(guild_id.to_string())
            .or_default()
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        save_pretty(&self.path, &*entries).await?;

        Ok(record)
    }

    pub async fn list(&self, guild_id: u64, user_id: u64) -> Vec<WarningRecord> {
        let entries = self.entries.lock().await;
        entries
            .get(&guild_id.to_string())
            .and_then(|guild| guild.get(&user_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    /// Delete the warning at a 1-based position, shifting later entries down.
    pub async fn delete_at(
        &self,
        guild_id: u64,
        user_id: u64,
        index: usize,
    ) -> anyhow::Result<WarningRecord> {
        let guild_key = guild_id.to_string();
        let user_key = user_id.to_string();

        let mut entries = self.entries.lock().await;
        let Some(list) = entries
            .get_mut(&guild_key)
            .and_then(|guild| guild.get_mut(&user_key))
        else {
            return Err(WarningStoreError::NotFound.into());
        };

        if index == 0 || index > list.len() {
            return Err(WarningStoreError::IndexOutOfRange {
                index,
                count: list.len(),
            }
            .into());
        }

        let removed = list.remove(index - 1);
        prune_leaf(&mut entries, &guild_key, &user_key);
        save_pretty(&self.path, &*entries).await?;

        Ok(removed)
    }

    /// Remove every warning the user has, returning how many were dropped.
    pub async fn clear_all(&self, guild_id: u64, user_id: u64) -> anyhow::Result<usize> {
        let guild_key = guild_id.to_string();

        let mut entries = self.entries.lock().await;
        let removed = entries
            .get_mut(&guild_key)
            .and_then(|guild| guild.remove(&user_id.to_string()))
            .map_or(0, |list| list.len());

        if removed == 0 {
            return Err(WarningStoreError::NotFound.into());
        }

        if entries.get(&guild_key).is_some_and(BTreeMap::is_empty) {
            entries.remove(&guild_key);
        }
        save_pretty(&self.path, &*entries).await?;

        Ok(removed)
    }

    /// Drop warnings older than `max_age_days`, returning what was removed.
    ///
    /// Records whose timestamp cannot be parsed are kept. The document is
    /// rewritten once per sweep, and only when something was removed.
    pub async fn expire_older_than(&self, max_age_days: i64) -> anyhow::Result<Vec<ExpiredWarning>> {
        let cutoff = Utc::now() - ChronoDuration::days(max_age_days);
        let mut expired = Vec::new();

        let mut entries = self.entries.lock().await;
        for (guild_key, users) in entries.iter_mut() {
            let guild_id = guild_key.parse::<u64>().unwrap_or(0);
            for (user_key, list) in users.iter_mut() {
                let user_id = user_key.parse::<u64>().unwrap_or(0);
                list.retain(|record| {
                    let lapsed = parse_timestamp_lenient(&record.timestamp)
                        .is_some_and(|stamp| stamp < cutoff);
                    if lapsed {
                        expired.push(ExpiredWarning {
                            guild_id,
                            user_id,
                            record: record.clone(),
                        });
                    }
                    !lapsed
                });
            }
            users.retain(|_, list| !list.is_empty());
        }
        entries.retain(|_, users| !users.is_empty());

        if !expired.is_empty() {
            save_pretty(&self.path, &*entries).await?;
        }

        Ok(expired)
    }
}

fn prune_leaf(entries: &mut WarningMap, guild_key: &str, user_key: &str) {
    let remove_guild = match entries.get_mut(guild_key) {
        Some(users) => {
            if users.get(user_key).is_some_and(Vec::is_empty) {
                users.remove(user_key);
            }
            users.is_empty()
        }
        None => false,
    };

    if remove_guild {
        entries.remove(guild_key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUILD: u64 = 900;
    const USER: u64 = 7;

    fn temp_store(tag: &str) -> (WarningStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "sable-warns-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (WarningStore::open(path.clone()), path)
    }

    fn record(reason: &str, timestamp: &str) -> WarningRecord {
        WarningRecord {
            reason: reason.to_owned(),
            moderator: "42".to_owned(),
            timestamp: timestamp.to_owned(),
        }
    }

    fn days_ago(days: i64) -> String {
        (Utc::now() - ChronoDuration::days(days)).to_rfc3339()
    }

    #[tokio::test]
    async fn warns_append_in_order() {
        let (store, path) = temp_store("append");

        store.warn(GUILD, USER, "spam", "42").await.unwrap();
        store.warn(GUILD, USER, "flood", "42").await.unwrap();

        let listed = store.list(GUILD, USER).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].reason, "spam");
        assert_eq!(listed[1].reason, "flood");
        assert!(parse_timestamp_lenient(&listed[0].timestamp).is_some());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn delete_is_one_based_and_shifts() {
        let (store, path) = temp_store("delete");

        store.warn(GUILD, USER, "first", "42").await.unwrap();
        store.warn(GUILD, USER, "second", "42").await.unwrap();
        store.warn(GUILD, USER, "third", "42").await.unwrap();

        let removed = store.delete_at(GUILD, USER, 2).await.unwrap();
        assert_eq!(removed.reason, "second");

        let listed = store.list(GUILD, USER).await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].reason, "first");
        assert_eq!(listed[1].reason, "third");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn delete_error_cases() {
        let (store, path) = temp_store("delete-errors");

        store.warn(GUILD, USER, "only", "42").await.unwrap();

        let err = store.delete_at(GUILD, USER, 2).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WarningStoreError>(),
            Some(&WarningStoreError::IndexOutOfRange { index: 2, count: 1 })
        );

        let err = store.delete_at(GUILD, USER, 0).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WarningStoreError>(),
            Some(&WarningStoreError::IndexOutOfRange { index: 0, count: 1 })
        );

        let err = store.delete_at(GUILD, 999, 1).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WarningStoreError>(),
            Some(&WarningStoreError::NotFound)
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn clear_then_not_found() {
        let (store, path) = temp_store("clear");

        store.warn(GUILD, USER, "spam", "42").await.unwrap();
        store.warn(GUILD, USER, "flood", "42").await.unwrap();

        assert_eq!(store.clear_all(GUILD, USER).await.unwrap(), 2);
        assert!(store.list(GUILD, USER).await.is_empty());

        let err = store.clear_all(GUILD, USER).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WarningStoreError>(),
            Some(&WarningStoreError::NotFound)
        );

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn expiry_honors_the_cutoff_and_keeps_unparsable() {
        let (store, path) = temp_store("expiry");

        store
            .append(GUILD, USER, record("old", &days_ago(31)))
            .await
            .unwrap();
        store
            .append(GUILD, USER, record("recent", &days_ago(29)))
            .await
            .unwrap();
        store
            .append(GUILD, USER, record("mystery", "not a date"))
            .await
            .unwrap();

        let expired = store.expire_older_than(30).await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].record.reason, "old");
        assert_eq!(expired[0].guild_id, GUILD);
        assert_eq!(expired[0].user_id, USER);

        let kept = store.list(GUILD, USER).await;
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].reason, "recent");
        assert_eq!(kept[1].reason, "mystery");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn expiry_prunes_empty_leaves() {
        let (store, path) = temp_store("expiry-prune");

        store
            .append(GUILD, USER, record("old", &days_ago(60)))
            .await
            .unwrap();

        let expired = store.expire_older_than(30).await.unwrap();
        assert_eq!(expired.len(), 1);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains(&GUILD.to_string()));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn persistence_round_trip() {
        let (store, path) = temp_store("round-trip");

        store.warn(GUILD, USER, "spam", "42").await.unwrap();
        store.warn(GUILD, 8, "flood", "43").await.unwrap();
        let before_user = store.list(GUILD, USER).await;
        let before_other = store.list(GUILD, 8).await;

        let reopened = WarningStore::open(path.clone());
        assert_eq!(reopened.list(GUILD, USER).await, before_user);
        assert_eq!(reopened.list(GUILD, 8).await, before_other);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn warn_delete_clear_scenario() {
        let (store, path) = temp_store("scenario");

        store.warn(GUILD, USER, "caps", "42").await.unwrap();
        store.warn(GUILD, USER, "links", "42").await.unwrap();

        assert_eq!(store.list(GUILD, USER).await.len(), 2);

        let removed = store.delete_at(GUILD, USER, 1).await.unwrap();
        assert_eq!(removed.reason, "caps");
        assert_eq!(store.list(GUILD, USER).await[0].reason, "links");

        assert_eq!(store.clear_all(GUILD, USER).await.unwrap(), 1);
        let err = store.clear_all(GUILD, USER).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<WarningStoreError>(),
            Some(&WarningStoreError::NotFound)
        );

        let _ = std::fs::remove_file(&path);
    }
}
