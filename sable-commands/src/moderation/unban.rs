use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    fetch_target_profile, guild_only_message, moderation_action_embed, usage_message,
};
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "unban",
    desc: "Lift a user's ban by their id.",
    category: "moderation",
    usage: "?unban <user id>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "Id of the user to unban"] user_id: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::BAN_MEMBERS).await?;

    let Some(raw_id) = user_id else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let user_id = match raw_id.trim().parse::<u64>() {
        Ok(id) if id != 0 => id,
        _ => {
            return Err(CommandFailure::Validation(format!(
                "`{raw_id}` is not a numeric user id."
            ))
            .into());
        }
    };
    let user_id = serenity::UserId::new(user_id);

    retry_rate_limited(|| guild_id.unban(ctx.http(), user_id))
        .await
        .map_err(map_platform_error)?;

    let target_profile = fetch_target_profile(ctx.http(), user_id).await;
    let embed = moderation_action_embed(
        &target_profile,
        user_id,
        ctx.author().id,
        "unbanned",
        None,
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
