use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, usage_message};
use crate::voice::require_target_in_voice;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::parse::parse_channel_id;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "move",
    desc: "Move a user to another voice channel.",
    category: "voice",
    usage: "?move <user> <#channel>",
};

#[poise::command(
    prefix_command,
    slash_command,
    rename = "move",
    category = "Voice"
)]
pub async fn move_member(
    ctx: Context<'_>,
    #[description = "The user to move"] user: Option<serenity::User>,
    #[description = "Destination voice channel"] channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MOVE_MEMBERS).await?;

    let (Some(user), Some(raw_channel)) = (user, channel) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    require_target_in_voice(&ctx, &user)?;

    let Some(channel_id) = parse_channel_id(&raw_channel) else {
        return Err(CommandFailure::Validation(format!(
            "`{raw_channel}` is not a channel mention or id."
        ))
        .into());
    };
    let destination = serenity::ChannelId::new(channel_id);

    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().voice_channel(destination);
        guild_id.edit_member(ctx.http(), user.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    ctx.say(format!("Moved {} to <#{channel_id}>.", user.name))
        .await?;

    Ok(())
}
