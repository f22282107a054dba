pub mod knockout;
pub mod prestige;
pub mod revive;
pub mod royalstats;

use std::collections::BTreeMap;

use rand::Rng;

use sable_store::Weapon;

pub(crate) const HIT_CHANCE: f64 = 0.7;
/// Chance that a landed hit is a crit.
pub(crate) const CRIT_CHANCE: f64 = 0.2;

pub(crate) const REVIVE_SUCCESS_CHANCE: f64 = 0.55;
pub(crate) const REVIVE_MIRACLE_CHANCE: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Outcome {
    Miss,
    Hit,
    Crit,
}

pub(crate) fn roll_outcome(rng: &mut impl Rng) -> Outcome {
    if rng.gen_range(0.0..1.0) >= HIT_CHANCE {
        Outcome::Miss
    } else if rng.gen_range(0.0..1.0) < CRIT_CHANCE {
        Outcome::Crit
    } else {
        Outcome::Hit
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ReviveOutcome {
    Miracle,
    Success,
    Fail,
}

pub(crate) fn roll_revive(rng: &mut impl Rng) -> ReviveOutcome {
    let roll = rng.gen_range(0.0..1.0);
    if roll < REVIVE_MIRACLE_CHANCE {
        ReviveOutcome::Miracle
    } else if roll < REVIVE_MIRACLE_CHANCE + REVIVE_SUCCESS_CHANCE {
        ReviveOutcome::Success
    } else {
        ReviveOutcome::Fail
    }
}

/// Pick a weapon proportionally to its weight.
pub(crate) fn pick_weapon<'a>(
    weapons: &'a BTreeMap<String, Weapon>,
    rng: &mut impl Rng,
) -> Option<(&'a str, &'a Weapon)> {
    let total: u64 = weapons.values().map(|weapon| u64::from(weapon.weight)).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (name, weapon) in weapons {
        let weight = u64::from(weapon.weight);
        if roll < weight {
            return Some((name.as_str(), weapon));
        }
        roll -= weight;
    }

    None
}

pub(crate) fn flavor_line<'a>(
    lines: &'a [String],
    fallback: &'a str,
    rng: &mut impl Rng,
) -> &'a str {
    if lines.is_empty() {
        fallback
    } else {
        &lines[rng.gen_range(0..lines.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn weapon(weight: u32) -> Weapon {
        Weapon {
            title: "Test".to_owned(),
            gif: String::new(),
            timeouts: vec![60],
            xp_multiplier: 1.0,
            weight,
            hit_lines: Vec::new(),
            miss_lines: Vec::new(),
            crit_lines: Vec::new(),
        }
    }

    #[test]
    fn pick_respects_weights() {
        let mut weapons = BTreeMap::new();
        weapons.insert("common".to_owned(), weapon(99));
        weapons.insert("rare".to_owned(), weapon(1));

        let mut rng = StdRng::seed_from_u64(7);
        let mut rare_picks = 0;
        for _ in 0..10_000 {
            let (name, _) = pick_weapon(&weapons, &mut rng).unwrap();
            if name == "rare" {
                rare_picks += 1;
            }
        }

        // Expected around 100 of 10k; allow a generous band.
        assert!(rare_picks > 20 && rare_picks < 300, "rare_picks={rare_picks}");
    }

    #[test]
    fn pick_with_no_weight_is_none() {
        let mut weapons = BTreeMap::new();
        weapons.insert("ghost".to_owned(), weapon(0));

        let mut rng = StdRng::seed_from_u64(7);
        assert!(pick_weapon(&weapons, &mut rng).is_none());
        assert!(pick_weapon(&BTreeMap::new(), &mut rng).is_none());
    }

    #[test]
    fn outcome_rates_are_plausible() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut hits = 0;
        let mut crits = 0;
        for _ in 0..10_000 {
            match roll_outcome(&mut rng) {
                Outcome::Hit => hits += 1,
                Outcome::Crit => crits += 1,
                Outcome::Miss => {}
            }
        }

        let landed = hits + crits;
        assert!(landed > 6_500 && landed < 7_500, "landed={landed}");
        assert!(crits > 1_000 && crits < 1_800, "crits={crits}");
    }

    #[test]
    fn revive_rates_are_plausible() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut miracles = 0;
        let mut successes = 0;
        for _ in 0..10_000 {
            match roll_revive(&mut rng) {
                ReviveOutcome::Miracle => miracles += 1,
                ReviveOutcome::Success => successes += 1,
                ReviveOutcome::Fail => {}
            }
        }

        assert!(miracles > 200 && miracles < 900, "miracles={miracles}");
        assert!(successes > 5_000 && successes < 6_100, "successes={successes}");
    }

    #[test]
    fn flavor_line_falls_back_when_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(flavor_line(&[], "fallback", &mut rng), "fallback");

        let lines = vec!["only".to_owned()];
        assert_eq!(flavor_line(&lines, "fallback", &mut rng), "only");
    }
}
