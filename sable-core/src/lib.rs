use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use sable_store::{CooldownTracker, Storage};

pub type Error = anyhow::Error;

/// The per-command cooldown trackers, all rate 1.
#[derive(Debug)]
pub struct Cooldowns {
    pub knockout: CooldownTracker,
    pub revive: CooldownTracker,
    pub social: CooldownTracker,
}

impl Cooldowns {
    pub fn new(knockout: Duration, revive: Duration, social: Duration) -> Self {
        Self {
            knockout: CooldownTracker::new(1, knockout),
            revive: CooldownTracker::new(1, revive),
            social: CooldownTracker::new(1, social),
        }
    }
}

#[derive(Debug)]
pub struct Data {
    pub storage: Arc<Storage>,
    pub cooldowns: Cooldowns,
    /// Guilds currently under anti-raid lockdown. In-memory only.
    pub antiraid: RwLock<HashSet<u64>>,
    /// Guild whose premium ("boost") membership shortens cooldowns.
    pub support_guild_id: Option<u64>,
    pub error_webhook_url: Option<String>,
    pub started_at: Instant,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Expected command failures, answered to the caller as one ephemeral
/// message by the framework error hook instead of the generic apology.
#[derive(Debug, thiserror::Error)]
pub enum CommandFailure {
    #[error("You don't have permission to use this command.")]
    PermissionDenied,
    #[error("You can't use this on someone with an equal or higher role.")]
    TargetOutranksCaller,
    #[error("This command is disabled in this server.")]
    CommandDisabled,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Validation(String),
    #[error("The platform is rate limiting me right now. Try again in a moment.")]
    RateLimited,
    #[error("I'm missing the permissions to do that. Check my role and channel permissions.")]
    Forbidden,
}
