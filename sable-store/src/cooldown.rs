use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::time::now_secs_f64;

/// Window multiplier applied for boosted callers.
pub const BOOST_WINDOW_FACTOR: f64 = 0.7;

/// Sliding-window cooldown over string scope keys (user or guild ids).
///
/// Timestamps are pruned lazily on read and nothing persists across a
/// restart. `remaining` followed by `trigger` is not atomic across two
/// concurrent handlers for the same key, so a near-simultaneous pair can
/// both pass the check; each call still takes the bucket lock exactly once.
#[derive(Debug)]
pub struct CooldownTracker {
    rate: usize,
    per: Duration,
    buckets: Mutex<HashMap<String, Vec<f64>>>,
}

impl CooldownTracker {
    pub fn new(rate: usize, per: Duration) -> Self {
        Self {
            rate: rate.max(1),
            per,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// The unboosted window.
    pub fn window(&self) -> Duration {
        self.per
    }

    /// How long `scope_key` must still wait; zero when it may fire now.
    pub async fn remaining(&self, scope_key: &str, boosted: bool) -> Duration {
        self.remaining_at(scope_key, boosted, now_secs_f64()).await
    }

    /// Record a use for `scope_key` at the current instant, unconditionally.
    pub async fn trigger(&self, scope_key: &str) {
        self.trigger_at(scope_key, now_secs_f64()).await;
    }

    fn effective_window(&self, boosted: bool) -> f64 {
        let window = self.per.as_secs_f64();
        if boosted {
            window * BOOST_WINDOW_FACTOR
        } else {
            window
        }
    }

    async fn remaining_at(&self, scope_key: &str, boosted: bool, now: f64) -> Duration {
        let window = self.effective_window(boosted);
        let mut buckets = self.buckets.lock().await;

        let Some(stamps) = buckets.get_mut(scope_key) else {
            return Duration::ZERO;
        };

        stamps.retain(|&stamp| now - stamp < window);
        if stamps.is_empty() {
            buckets.remove(scope_key);
            return Duration::ZERO;
        }

        if stamps.len() < self.rate {
            return Duration::ZERO;
        }

        let oldest = stamps[0];
        Duration::from_secs_f64((window - (now - oldest)).max(0.0))
    }

    async fn trigger_at(&self, scope_key: &str, now: f64) {
        let mut buckets = self.buckets.lock().await;
        buckets.entry(scope_key.to_owned()).or_default().push(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: u64 = 1000;

    fn tracker() -> CooldownTracker {
        CooldownTracker::new(1, Duration::from_secs(WINDOW))
    }

    #[tokio::test]
    async fn fresh_key_has_no_cooldown() {
        let tracker = tracker();
        assert_eq!(tracker.remaining_at("1", false, 50.0).await, Duration::ZERO);
    }

    #[tokio::test]
    async fn triggered_key_waits_out_the_window() {
        let tracker = tracker();
        tracker.trigger_at("1", 100.0).await;

        let remaining = tracker.remaining_at("1", false, 400.0).await;
        assert_eq!(remaining, Duration::from_secs(700));

        // Still cooling just inside the window, free just past it.
        assert!(tracker.remaining_at("1", false, 1099.0).await > Duration::ZERO);
        assert_eq!(
            tracker.remaining_at("1", false, 1100.5).await,
            Duration::ZERO
        );
    }

    #[tokio::test]
    async fn boosted_callers_get_a_shorter_window() {
        let tracker = tracker();
        tracker.trigger_at("1", 0.0).await;

        // Effective window is 700s; at t=650 a boosted caller waits 50s while
        // an unboosted one still waits 350s.
        assert_eq!(
            tracker.remaining_at("1", true, 650.0).await,
            Duration::from_secs(50)
        );
        assert_eq!(
            tracker.remaining_at("1", false, 650.0).await,
            Duration::from_secs(350)
        );
        assert_eq!(tracker.remaining_at("1", true, 701.0).await, Duration::ZERO);
    }

    #[tokio::test]
    async fn remaining_never_exceeds_the_effective_window() {
        let tracker = tracker();
        tracker.trigger_at("1", 100.0).await;

        let unboosted = tracker.remaining_at("1", false, 100.0).await;
        assert!(unboosted <= Duration::from_secs(WINDOW));

        let boosted = tracker.remaining_at("1", true, 100.0).await;
        assert!(boosted <= Duration::from_secs_f64(WINDOW as f64 * BOOST_WINDOW_FACTOR));
    }

    #[tokio::test]
    async fn expired_stamps_are_pruned() {
        let tracker = tracker();
        tracker.trigger_at("1", 0.0).await;
        tracker.trigger_at("2", 0.0).await;

        assert_eq!(tracker.remaining_at("1", false, 2000.0).await, Duration::ZERO);

        // A new trigger after pruning cools down from scratch.
        tracker.trigger_at("1", 2000.0).await;
        assert_eq!(
            tracker.remaining_at("1", false, 2100.0).await,
            Duration::from_secs(900)
        );
    }

    #[tokio::test]
    async fn keys_are_independent() {
        let tracker = tracker();
        tracker.trigger_at("1", 0.0).await;

        assert!(tracker.remaining_at("1", false, 10.0).await > Duration::ZERO);
        assert_eq!(tracker.remaining_at("2", false, 10.0).await, Duration::ZERO);
    }
}
