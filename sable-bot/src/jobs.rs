use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{debug, error, info, warn};

use sable_commands::moderation::publish_to_log_channel;
use sable_store::{AppliedPreset, Storage, hash_preset};
use sable_utils::embed::basic_embed;

const WARNING_MAX_AGE_DAYS: i64 = 30;
const WARNING_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
const PRESET_DRIFT_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60 * 60);
const DEATHLOG_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);
const STATUS_ROTATION_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5 * 60);

/// Start the periodic background sweeps. Each runs until the process exits;
/// the first pass of each fires right after startup.
pub fn spawn(ctx: serenity::Context, storage: Arc<Storage>) {
    tokio::spawn(warning_expiry_loop(ctx.http.clone(), storage.clone()));
    tokio::spawn(preset_drift_loop(ctx.http.clone(), storage.clone()));
    tokio::spawn(deathlog_sweep_loop(storage));
    tokio::spawn(status_rotation_loop(ctx));
}

/// Drop warnings older than thirty days and announce each removal in the
/// guild's log channel.
async fn warning_expiry_loop(http: Arc<serenity::Http>, storage: Arc<Storage>) {
    let mut ticker = tokio::time::interval(WARNING_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;

        let expired = match storage.warnings.expire_older_than(WARNING_MAX_AGE_DAYS).await {
            Ok(expired) => expired,
            Err(source) => {
                error!(?source, "warning expiry sweep failed");
                continue;
            }
        };

        if expired.is_empty() {
            continue;
        }
        info!(count = expired.len(), "expired old warnings");

        for entry in expired {
            let embed = basic_embed(
                "Warning expired",
                format!(
                    "**User :** <@{}>\n**Reason :** {}\n**Moderator :** <@{}>\n**Issued :** {}",
                    entry.user_id, entry.record.reason, entry.record.moderator, entry.record.timestamp
                ),
            );
            publish_to_log_channel(
                &http,
                &storage,
                serenity::GuildId::new(entry.guild_id),
                embed,
            )
            .await;
        }
    }
}

/// Compare each guild's applied preset hash against the current preset
/// table. On a change, DM the guild owner once and advance the recorded
/// hash so the next sweep stays quiet until the table changes again.
async fn preset_drift_loop(http: Arc<serenity::Http>, storage: Arc<Storage>) {
    let mut ticker = tokio::time::interval(PRESET_DRIFT_INTERVAL);
    loop {
        ticker.tick().await;

        for (guild_id, applied) in storage.applied_presets.all().await {
            let Some(preset) = storage.presets.get(&applied.preset) else {
                warn!(guild_id, preset = %applied.preset, "applied preset is gone from the table");
                continue;
            };

            let hash = match hash_preset(preset) {
                Ok(hash) => hash,
                Err(source) => {
                    error!(?source, "failed to hash a preset during the drift sweep");
                    continue;
                }
            };
            if hash == applied.hash {
                continue;
            }

            info!(guild_id, preset = %applied.preset, "automod preset drifted");
            notify_owner_of_drift(&http, serenity::GuildId::new(guild_id), &applied.preset).await;

            if let Err(source) = storage
                .applied_presets
                .set(
                    guild_id,
                    AppliedPreset {
                        preset: applied.preset.clone(),
                        hash,
                    },
                )
                .await
            {
                error!(?source, guild_id, "failed to record the drifted preset hash");
            }
        }
    }
}

async fn notify_owner_of_drift(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    preset_name: &str,
) {
    let guild = match guild_id.to_partial_guild(http).await {
        Ok(guild) => guild,
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), "failed to fetch guild for drift notice");
            return;
        }
    };

    let embed = basic_embed(
        "Automod preset updated",
        format!(
            "The preset **{preset_name}** applied in **{}** has changed in the preset table. \
             Run `{}force_update` there to push the new version live.",
            guild.name,
            sable_utils::COMMAND_PREFIX
        ),
    );

    let sent = async {
        let dm_channel = guild.owner_id.create_dm_channel(http).await?;
        dm_channel
            .send_message(http, serenity::CreateMessage::new().embed(embed))
            .await
    }
    .await;

    if let Err(source) = sent {
        warn!(?source, guild_id = guild_id.get(), "failed to DM the guild owner about drift");
    }
}

/// Cycle the bot's presence through a fixed set of statuses.
async fn status_rotation_loop(ctx: serenity::Context) {
    let statuses = [
        serenity::ActivityData::playing("knockout royale"),
        serenity::ActivityData::watching("the mod queue"),
        serenity::ActivityData::watching("for raids"),
    ];

    let mut ticker = tokio::time::interval(STATUS_ROTATION_INTERVAL);
    let mut index = 0usize;
    loop {
        ticker.tick().await;
        ctx.set_activity(Some(statuses[index % statuses.len()].clone()));
        index += 1;
    }
}

/// Drop knockout records whose timeout has lapsed.
async fn deathlog_sweep_loop(storage: Arc<Storage>) {
    let mut ticker = tokio::time::interval(DEATHLOG_SWEEP_INTERVAL);
    loop {
        ticker.tick().await;

        match storage.deathlog.prune_lapsed().await {
            Ok(0) => {}
            Ok(pruned) => debug!(pruned, "pruned lapsed knockout records"),
            Err(source) => error!(?source, "deathlog sweep failed"),
        }
    }
}
