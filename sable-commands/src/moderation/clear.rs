use poise::serenity_prelude as serenity;

use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "clear",
    desc: "Bulk-delete recent messages in this channel.",
    category: "moderation",
    usage: "?clear <count>",
};

const MAX_CLEAR: u8 = 100;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "How many messages to delete (1-100)"] count: Option<u8>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_MESSAGES).await?;

    let count = count.unwrap_or(10);
    if count == 0 || count > MAX_CLEAR {
        return Err(CommandFailure::Validation(format!(
            "Count must be between 1 and {MAX_CLEAR}."
        ))
        .into());
    }

    let channel_id = ctx.channel_id();
    let messages = channel_id
        .messages(ctx.http(), serenity::GetMessages::new().limit(count))
        .await
        .map_err(map_platform_error)?;

    let ids: Vec<serenity::MessageId> = messages.iter().map(|message| message.id).collect();
    let deleted = ids.len();
    if deleted == 0 {
        ctx.send(
            poise::CreateReply::default()
                .ephemeral(true)
                .content("Nothing to delete."),
        )
        .await?;
        return Ok(());
    }

    retry_rate_limited(|| channel_id.delete_messages(ctx.http(), ids.clone()))
        .await
        .map_err(map_platform_error)?;

    ctx.send(
        poise::CreateReply::default()
            .ephemeral(true)
            .content(format!("Deleted {deleted} message(s).")),
    )
    .await?;

    Ok(())
}
