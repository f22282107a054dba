use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, usage_message};
use crate::voice::require_target_in_voice;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{Context, Error};
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "undeafen",
    desc: "Lift a user's server-deafen in voice.",
    category: "voice",
    usage: "?undeafen <user>",
};

#[poise::command(prefix_command, slash_command, category = "Voice")]
pub async fn undeafen(
    ctx: Context<'_>,
    #[description = "The user to undeafen"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::DEAFEN_MEMBERS).await?;

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    require_target_in_voice(&ctx, &user)?;

    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().deafen(false);
        guild_id.edit_member(ctx.http(), user.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    ctx.say(format!("{} has been undeafened.", user.name))
        .await?;

    Ok(())
}
