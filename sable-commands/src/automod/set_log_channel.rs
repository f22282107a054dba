use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, usage_message};
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::parse::parse_channel_id;

pub const META: CommandMeta = CommandMeta {
    name: "set_log_channel",
    desc: "Set the channel automod alerts are sent to.",
    category: "automod",
    usage: "?set_log_channel <#channel>",
};

// Writes the same guild → channel map `setlogs` does; automod alerts and
// moderation logs share one channel per guild.
#[poise::command(prefix_command, slash_command, category = "Automod")]
pub async fn set_log_channel(
    ctx: Context<'_>,
    #[description = "The alert channel"] channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_GUILD).await?;

    let Some(raw) = channel else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let Some(channel_id) = parse_channel_id(&raw) else {
        return Err(CommandFailure::Validation(format!(
            "`{raw}` is not a channel mention or id."
        ))
        .into());
    };

    ctx.data()
        .storage
        .log_channels
        .set(guild_id.get(), channel_id)
        .await?;

    ctx.say(format!("Automod alerts will be sent to <#{channel_id}>."))
        .await?;

    Ok(())
}
