use poise::serenity_prelude as serenity;
use tracing::error;

use sable_store::Storage;

use crate::moderation::embeds::{
    TargetProfile, moderation_action_embed, send_moderation_target_dm_for_guild,
};

/// Post an embed to the guild's configured log channel, if any.
///
/// Failures are logged, never propagated: notifications run after the
/// mutation has committed and must not undo it.
pub async fn publish_to_log_channel(
    http: &serenity::Http,
    storage: &Storage,
    guild_id: serenity::GuildId,
    embed: serenity::CreateEmbed,
) {
    let Some(channel_id) = storage.log_channels.get(guild_id.get()).await else {
        return;
    };

    if let Err(source) = serenity::ChannelId::new(channel_id)
        .send_message(http, serenity::CreateMessage::new().embed(embed))
        .await
    {
        error!(?source, guild_id = guild_id.get(), "failed to publish to the log channel");
    }
}

/// Post-commit notification pair for a moderation action: best-effort DM to
/// the target, then the action embed to the log channel. Each half fails
/// independently of the other.
#[allow(clippy::too_many_arguments)]
pub async fn notify_moderation_action(
    http: &serenity::Http,
    storage: &Storage,
    guild_id: serenity::GuildId,
    target: &serenity::User,
    target_profile: &TargetProfile,
    moderator_id: serenity::UserId,
    action_past_tense: &str,
    reason: Option<&str>,
    duration: Option<&str>,
) {
    let _ = send_moderation_target_dm_for_guild(
        http,
        target,
        guild_id,
        action_past_tense,
        reason,
        duration,
    )
    .await;

    let embed = moderation_action_embed(
        target_profile,
        target.id,
        moderator_id,
        action_past_tense,
        reason,
        duration,
    );
    publish_to_log_channel(http, storage, guild_id, embed).await;
}
