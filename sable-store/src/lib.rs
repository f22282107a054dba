//! Flat-JSON persistence: every store owns one whole-file document under the
//! data directory, loads it fully at startup, and rewrites it after each
//! successful mutation, serialized through the store's async mutex.

/// Automod presets, applied-preset records, and the drift hash.
pub mod automod;
/// Sliding-window cooldown tracker.
pub mod cooldown;
/// Active knockouts awaiting revive or lapse.
pub mod deathlog;
mod document;
/// Gif table for the social commands.
pub mod gifs;
/// Per-guild command toggles.
pub mod guild_config;
/// Guild → log channel map.
pub mod modlog;
/// Royale player stats.
pub mod stats;
/// Time helpers shared by the stores, including the lenient timestamp parse.
pub mod time;
/// Warning lifecycle store.
pub mod warnings;
/// Royale weapon table.
pub mod weapons;

use std::path::Path;

pub use automod::{AppliedPreset, AppliedPresetStore, AutomodPreset, PresetStore, hash_preset};
pub use cooldown::{BOOST_WINDOW_FACTOR, CooldownTracker};
pub use deathlog::{DeathlogEntry, DeathlogStore};
pub use gifs::GifStore;
pub use guild_config::CommandToggleStore;
pub use modlog::LogChannelStore;
pub use stats::{LevelProgress, MAX_LEVEL, PlayerStats, StatsStore, xp_to_next_level};
pub use warnings::{ExpiredWarning, WarningRecord, WarningStore, WarningStoreError};
pub use weapons::{Weapon, WeaponStore};

/// Every persistent store, rooted at one data directory.
#[derive(Debug)]
pub struct Storage {
    pub warnings: WarningStore,
    pub log_channels: LogChannelStore,
    pub stats: StatsStore,
    pub presets: PresetStore,
    pub applied_presets: AppliedPresetStore,
    pub command_toggles: CommandToggleStore,
    pub deathlog: DeathlogStore,
    pub gifs: GifStore,
    pub weapons: WeaponStore,
}

impl Storage {
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        Ok(Self {
            warnings: WarningStore::open(data_dir.join("warns.json")),
            log_channels: LogChannelStore::open(data_dir.join("log_channels.json")),
            stats: StatsStore::open(data_dir.join("royal_stats.json")),
            presets: PresetStore::open(&data_dir.join("ampres.json")),
            applied_presets: AppliedPresetStore::open(data_dir.join("applied_presets.json")),
            command_toggles: CommandToggleStore::open(data_dir.join("guild_conf.json")),
            deathlog: DeathlogStore::open(data_dir.join("deathlog.json")),
            gifs: GifStore::open(&data_dir.join("interactions.json")),
            weapons: WeaponStore::open(&data_dir.join("weapons.json")),
        })
    }
}
