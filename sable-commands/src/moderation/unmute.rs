use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, target_profile_from_user, usage_message,
};
use crate::moderation::notify::notify_moderation_action;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{Context, Error};
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "unmute",
    desc: "Lift a user's timeout.",
    category: "moderation",
    usage: "?unmute <user> [reason]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unmute(
    ctx: Context<'_>,
    #[description = "The user to unmute"] user: Option<serenity::User>,
    #[description = "Reason"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MODERATE_MEMBERS).await?;

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().enable_communication();
        guild_id.edit_member(ctx.http(), user.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    let target_profile = target_profile_from_user(&user);
    notify_moderation_action(
        ctx.http(),
        &ctx.data().storage,
        guild_id,
        &user,
        &target_profile,
        ctx.author().id,
        "unmuted",
        reason.as_deref(),
        None,
    )
    .await;

    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        ctx.author().id,
        "unmuted",
        reason.as_deref(),
        None,
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
