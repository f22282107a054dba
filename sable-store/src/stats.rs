use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::document::{load_or_default, save_pretty};

/// Levels stop here; further XP only counts toward prestige eligibility.
pub const MAX_LEVEL: u32 = 50;

/// XP required to advance out of `level`.
pub fn xp_to_next_level(level: u32) -> u64 {
    100 + u64::from(level) * 25
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub kills: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub revives: u64,
    #[serde(default)]
    pub failed_revives: u64,
    #[serde(default)]
    pub xp: u64,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub prestige: u32,
}

fn default_level() -> u32 {
    1
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            kills: 0,
            deaths: 0,
            revives: 0,
            failed_revives: 0,
            xp: 0,
            level: 1,
            prestige: 0,
        }
    }
}

/// Outcome of one XP award.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelProgress {
    pub levels_gained: u32,
    pub level: u32,
    pub capped: bool,
}

/// User → royale stats, one document for every guild.
#[derive(Debug)]
pub struct StatsStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, PlayerStats>>,
}

impl StatsStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Mutex::new(load_or_default(&path));
        Self { path, entries }
    }

    pub async fn get(&self, user_id: u64) -> PlayerStats {
        let entries = self.entries.lock().await;
        entries.get(&user_id.to_string()).cloned().unwrap_or_default()
    }

    pub async fn record_kill(&self, user_id: u64) -> anyhow::Result<()> {
        self.update(user_id, |stats| stats.kills += 1).await?;
        Ok(())
    }

    pub async fn record_death(&self, user_id: u64) -> anyhow::Result<()> {
        self.update(user_id, |stats| stats.deaths += 1).await?;
        Ok(())
    }

    pub async fn record_revive(&self, user_id: u64, success: bool) -> anyhow::Result<()> {
        self.update(user_id, |stats| {
            if success {
                stats.revives += 1;
            } else {
                stats.failed_revives += 1;
            }
        })
        .await?;
        Ok(())
    }

    /// Award XP, rolling over into level-ups until the cap.
    pub async fn add_xp(&self, user_id: u64, amount: u64) -> anyhow::Result<LevelProgress> {
        let mut progress = LevelProgress::default();
        self.update(user_id, |stats| {
            stats.xp += amount;
            while stats.level < MAX_LEVEL && stats.xp >= xp_to_next_level(stats.level) {
                stats.xp -= xp_to_next_level(stats.level);
                stats.level += 1;
                progress.levels_gained += 1;
            }
            progress.level = stats.level;
            progress.capped = stats.level >= MAX_LEVEL;
        })
        .await?;

        Ok(progress)
    }

    /// Prestige resets level and XP; only available at the level cap.
    /// Returns the new prestige count, or `None` when not yet eligible.
    pub async fn prestige(&self, user_id: u64) -> anyhow::Result<Option<u32>> {
        let mut new_prestige = None;
        self.update(user_id, |stats| {
            if stats.level >= MAX_LEVEL {
                stats.level = 1;
                stats.xp = 0;
                stats.prestige += 1;
                new_prestige = Some(stats.prestige);
            }
        })
        .await?;

        Ok(new_prestige)
    }

    async fn update(
        &self,
        user_id: u64,
        apply: impl FnOnce(&mut PlayerStats),
    ) -> anyhow::Result<PlayerStats> {
        let mut entries = self.entries.lock().await;
        let stats = entries.entry(user_id.to_string()).or_default();
        apply(stats);
        let snapshot = stats.clone();
        save_pretty(&self.path, &*entries).await?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> (StatsStore, PathBuf) {
        let path = std::env::temp_dir().join(format!(
            "sable-stats-{}-{}.json",
            tag,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        (StatsStore::open(path.clone()), path)
    }

    #[test]
    fn xp_curve() {
        assert_eq!(xp_to_next_level(1), 125);
        assert_eq!(xp_to_next_level(10), 350);
        assert_eq!(xp_to_next_level(49), 1325);
    }

    #[tokio::test]
    async fn xp_rolls_over_into_levels() {
        let (store, path) = temp_store("xp");

        let progress = store.add_xp(1, 150).await.unwrap();
        assert_eq!(progress.levels_gained, 1);
        assert_eq!(progress.level, 2);

        let stats = store.get(1).await;
        assert_eq!(stats.level, 2);
        assert_eq!(stats.xp, 25);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn levels_stop_at_the_cap() {
        let (store, path) = temp_store("cap");

        store.add_xp(1, 10_000_000).await.unwrap();
        let stats = store.get(1).await;
        assert_eq!(stats.level, MAX_LEVEL);

        let progress = store.add_xp(1, 500).await.unwrap();
        assert_eq!(progress.levels_gained, 0);
        assert!(progress.capped);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn prestige_requires_the_cap_and_resets() {
        let (store, path) = temp_store("prestige");

        assert_eq!(store.prestige(1).await.unwrap(), None);

        store.add_xp(1, 10_000_000).await.unwrap();
        assert_eq!(store.prestige(1).await.unwrap(), Some(1));

        let stats = store.get(1).await;
        assert_eq!(stats.level, 1);
        assert_eq!(stats.xp, 0);
        assert_eq!(stats.prestige, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn counters_persist() {
        let (store, path) = temp_store("counters");

        store.record_kill(1).await.unwrap();
        store.record_death(1).await.unwrap();
        store.record_revive(1, true).await.unwrap();
        store.record_revive(1, false).await.unwrap();

        let reopened = StatsStore::open(path.clone());
        let stats = reopened.get(1).await;
        assert_eq!(stats.kills, 1);
        assert_eq!(stats.deaths, 1);
        assert_eq!(stats.revives, 1);
        assert_eq!(stats.failed_revives, 1);

        let _ = std::fs::remove_file(&path);
    }
}
