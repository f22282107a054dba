use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::document::{load_or_default, save_pretty_sync};

/// One royale weapon with its flavor lines and timeout tiers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub title: String,
    #[serde(default)]
    pub gif: String,
    /// Candidate timeout durations in seconds; one is picked per hit.
    pub timeouts: Vec<u64>,
    #[serde(default = "default_xp_multiplier")]
    pub xp_multiplier: f64,
    /// Relative pick weight; rare weapons carry small values.
    #[serde(default = "default_weight")]
    pub weight: u32,
    #[serde(default)]
    pub hit_lines: Vec<String>,
    #[serde(default)]
    pub miss_lines: Vec<String>,
    #[serde(default)]
    pub crit_lines: Vec<String>,
}

fn default_xp_multiplier() -> f64 {
    1.0
}

fn default_weight() -> u32 {
    100
}

/// Read-only weapon table, seeded with the built-in arsenal when missing.
#[derive(Debug, Default)]
pub struct WeaponStore {
    weapons: BTreeMap<String, Weapon>,
}

impl WeaponStore {
    pub fn open(path: &Path) -> Self {
        let mut weapons: BTreeMap<String, Weapon> = load_or_default(path);
        if weapons.is_empty() {
            weapons = default_weapons();
            if let Err(source) = save_pretty_sync(path, &weapons) {
                warn!(?source, "failed to seed the weapon table");
            }
        }

        Self { weapons }
    }

    pub fn all(&self) -> &BTreeMap<String, Weapon> {
        &self.weapons
    }
}

fn default_weapons() -> BTreeMap<String, Weapon> {
    let mut weapons = BTreeMap::new();
    weapons.insert(
        "pan".to_owned(),
        Weapon {
            title: "Frying Pan".to_owned(),
            gif: String::new(),
            timeouts: vec![300, 600],
            xp_multiplier: 1.0,
            weight: 100,
            hit_lines: vec!["{target} got bonked with a frying pan!".to_owned()],
            miss_lines: vec!["{target} ducked under the pan swing.".to_owned()],
            crit_lines: vec!["CLANG! {target} is seeing stars.".to_owned()],
        },
    );
    weapons.insert(
        "bat".to_owned(),
        Weapon {
            title: "Baseball Bat".to_owned(),
            gif: String::new(),
            timeouts: vec![600, 900],
            xp_multiplier: 1.2,
            weight: 70,
            hit_lines: vec!["{target} took a home-run swing!".to_owned()],
            miss_lines: vec!["Swing and a miss on {target}.".to_owned()],
            crit_lines: vec!["{target} got sent to the bleachers!".to_owned()],
        },
    );
    weapons.insert(
        "rocket".to_owned(),
        Weapon {
            title: "Rocket Launcher".to_owned(),
            gif: String::new(),
            timeouts: vec![1800, 3600],
            xp_multiplier: 2.5,
            weight: 5,
            hit_lines: vec!["{target} got launched into orbit!".to_owned()],
            miss_lines: vec!["The rocket whizzed right past {target}.".to_owned()],
            crit_lines: vec!["Direct hit! {target} is gone.".to_owned()],
        },
    );
    weapons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_a_weighted_arsenal() {
        let path = std::env::temp_dir().join(format!("sable-weapons-{}.json", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let store = WeaponStore::open(&path);
        assert!(store.all().len() >= 3);
        assert!(store.all().values().all(|weapon| !weapon.timeouts.is_empty()));
        assert!(store.all().values().any(|weapon| weapon.weight < 10));

        let _ = std::fs::remove_file(&path);
    }
}
