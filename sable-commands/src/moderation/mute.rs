use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, moderation_bot_target_message,
    moderation_self_action_message, target_profile_from_user, usage_message,
};
use crate::moderation::notify::notify_moderation_action;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_store::time::now_unix_secs;
use sable_utils::formatting::format_compact_duration;
use sable_utils::permissions::caller_outranks_target;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "mute",
    desc: "Time a user out for a number of minutes.",
    category: "moderation",
    usage: "?mute <user> <minutes> [reason]",
};

// Platform ceiling for communication timeouts.
const MAX_TIMEOUT_MINUTES: u64 = 28 * 24 * 60;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn mute(
    ctx: Context<'_>,
    #[description = "The user to mute"] user: Option<serenity::User>,
    #[description = "Timeout length in minutes"] minutes: Option<u64>,
    #[description = "Reason for the timeout"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MODERATE_MEMBERS).await?;

    let (Some(user), Some(minutes)) = (user, minutes) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }
    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("mute")).await?;
        return Ok(());
    }

    if minutes == 0 || minutes > MAX_TIMEOUT_MINUTES {
        return Err(CommandFailure::Validation(format!(
            "Timeout must be between 1 and {MAX_TIMEOUT_MINUTES} minutes."
        ))
        .into());
    }

    if !caller_outranks_target(ctx.http(), guild_id, ctx.author().id, user.id).await? {
        return Err(CommandFailure::TargetOutranksCaller.into());
    }

    let until_unix = now_unix_secs() + minutes * 60;
    let until = serenity::Timestamp::from_unix_timestamp(until_unix as i64)?;

    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().disable_communication_until_datetime(until);
        guild_id.edit_member(ctx.http(), user.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    let duration = format_compact_duration(minutes * 60);
    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());
    let target_profile = target_profile_from_user(&user);

    notify_moderation_action(
        ctx.http(),
        &ctx.data().storage,
        guild_id,
        &user,
        &target_profile,
        ctx.author().id,
        "muted",
        Some(&reason),
        Some(&duration),
    )
    .await;

    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        ctx.author().id,
        "muted",
        Some(&reason),
        Some(&duration),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
