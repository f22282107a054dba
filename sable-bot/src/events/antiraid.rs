use std::time::{Duration, SystemTime, UNIX_EPOCH};

use poise::serenity_prelude as serenity;
use tracing::{error, warn};

use sable_commands::moderation::{is_missing_permissions_error, send_moderation_target_dm_for_guild};
use sable_core::Data;
use sable_utils::permissions::resolve_user_permissions;

const LOCKDOWN_TIMEOUT: Duration = Duration::from_secs(3600);

/// During an anti-raid lockdown every message from a non-administrator is
/// deleted and its author timed out for an hour.
pub async fn handle_message_lockdown(
    ctx: &serenity::Context,
    data: &Data,
    message: &serenity::Message,
) {
    // Ignore bots and webhooks.
    if message.author.bot || message.webhook_id.is_some() {
        return;
    }

    let Some(guild_id) = message.guild_id else {
        return;
    };

    if !data.antiraid.read().await.contains(&guild_id.get()) {
        return;
    }

    // Administrators and the owner keep talking during a lockdown.
    match resolve_user_permissions(&ctx.http, guild_id, message.author.id).await {
        Ok(perms) if perms.contains(serenity::Permissions::ADMINISTRATOR) => return,
        Ok(_) => {}
        Err(source) => {
            error!(?source, "failed to resolve permissions during lockdown");
            return;
        }
    }

    if let Err(source) = message.delete(&ctx.http).await {
        if is_missing_permissions_error(&source) {
            warn!("missing permissions to delete a message during lockdown");
        } else {
            error!(?source, "failed to delete a message during lockdown");
        }
    }

    let until_unix = SystemTime::now()
        .checked_add(LOCKDOWN_TIMEOUT)
        .unwrap_or_else(SystemTime::now)
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since_epoch| since_epoch.as_secs()) as i64;

    if let Ok(until) = serenity::Timestamp::from_unix_timestamp(until_unix) {
        let edit = serenity::EditMember::new().disable_communication_until_datetime(until);
        if let Err(source) = guild_id
            .edit_member(&ctx.http, message.author.id, edit)
            .await
        {
            if is_missing_permissions_error(&source) {
                warn!(
                    user_id = %message.author.id,
                    "missing permissions to timeout a user during lockdown \
                     (check role hierarchy)"
                );
            } else {
                error!(?source, "failed to timeout a user during lockdown");
            }
        }
    }

    let _ = send_moderation_target_dm_for_guild(
        &ctx.http,
        &message.author,
        guild_id,
        "timed out",
        Some("Anti-raid lockdown is active in this server."),
        Some("1h"),
    )
    .await;
}
