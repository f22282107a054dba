use poise::serenity_prelude as serenity;

use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::parse::parse_channel_id;

pub const META: CommandMeta = CommandMeta {
    name: "setlogs",
    desc: "Set or clear the channel moderation actions are logged to.",
    category: "moderation",
    usage: "?setlogs [#channel]",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn setlogs(
    ctx: Context<'_>,
    #[description = "The log channel; omit to clear"] channel: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_GUILD).await?;

    let storage = &ctx.data().storage;

    let Some(raw) = channel else {
        if storage.log_channels.clear(guild_id.get()).await? {
            ctx.say("Log channel cleared.").await?;
        } else {
            ctx.say("No log channel was configured.").await?;
        }
        return Ok(());
    };

    let Some(channel_id) = parse_channel_id(&raw) else {
        return Err(CommandFailure::Validation(format!(
            "`{raw}` is not a channel mention or id."
        ))
        .into());
    };

    storage.log_channels.set(guild_id.get(), channel_id).await?;
    ctx.say(format!("Moderation actions will be logged to <#{channel_id}>."))
        .await?;

    Ok(())
}
