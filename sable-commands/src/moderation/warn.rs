use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, moderation_bot_target_message,
    moderation_self_action_message, target_profile_from_user, usage_message,
};
use crate::moderation::notify::notify_moderation_action;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "warn",
    desc: "Issue a warning to a user.",
    category: "moderation",
    usage: "?warn <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warn(
    ctx: Context<'_>,
    #[description = "The user to warn"] user: Option<serenity::User>,
    #[description = "Reason for warning"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_MESSAGES).await?;

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if user.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }
    if user.id == ctx.author().id {
        ctx.say(moderation_self_action_message("warn")).await?;
        return Ok(());
    }

    let reason = reason.unwrap_or_else(|| "No reason provided".to_owned());
    ctx.data()
        .storage
        .warnings
        .warn(
            guild_id.get(),
            user.id.get(),
            &reason,
            &ctx.author().id.to_string(),
        )
        .await?;

    let total = ctx
        .data()
        .storage
        .warnings
        .list(guild_id.get(), user.id.get())
        .await
        .len();

    let target_profile = target_profile_from_user(&user);
    notify_moderation_action(
        ctx.http(),
        &ctx.data().storage,
        guild_id,
        &user,
        &target_profile,
        ctx.author().id,
        "warned",
        Some(&reason),
        None,
    )
    .await;

    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        ctx.author().id,
        &format!("warned (warning #{total})"),
        Some(&reason),
        None,
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
