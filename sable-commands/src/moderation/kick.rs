use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, moderation_bot_target_message,
    moderation_self_action_message, target_profile_from_user, usage_message,
};
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::permissions::caller_outranks_target;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "kick",
    desc: "Kick a user from the server.",
    category: "moderation",
    usage: "?kick <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "The user to kick"] user: Option<serenity::User>,
    #[description = "Reason for kicking"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::KICK_MEMBERS).await?;

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }
    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("kick")).await?;
        return Ok(());
    }

    if !caller_outranks_target(ctx.http(), guild_id, ctx.author().id, user.id).await? {
        return Err(CommandFailure::TargetOutranksCaller.into());
    }

    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());
    let target_profile = target_profile_from_user(&user);

    // DM first: the target is unreachable once kicked.
    let _ = crate::moderation::send_moderation_target_dm_for_guild(
        ctx.http(),
        &user,
        guild_id,
        "kicked",
        Some(&reason),
        None,
    )
    .await;

    retry_rate_limited(|| guild_id.kick_with_reason(ctx.http(), user.id, &reason))
        .await
        .map_err(map_platform_error)?;

    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        ctx.author().id,
        "kicked",
        Some(&reason),
        None,
    );
    crate::moderation::publish_to_log_channel(
        ctx.http(),
        &ctx.data().storage,
        guild_id,
        embed.clone(),
    )
    .await;
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
