use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::automod::delete_preset_rule;
use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{CommandFailure, Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "clear_config",
    desc: "Remove this server's automod preset and its platform rule.",
    category: "automod",
    usage: "?clear_config",
};

#[poise::command(prefix_command, slash_command, category = "Automod")]
pub async fn clear_config(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_GUILD).await?;

    let storage = &ctx.data().storage;

    let Some(applied) = storage.applied_presets.get(guild_id.get()).await else {
        return Err(
            CommandFailure::NotFound("This server has no automod preset applied.".to_owned())
                .into(),
        );
    };

    // The record is the source of truth; rule removal is best-effort.
    storage.applied_presets.clear(guild_id.get()).await?;

    if let Some(preset) = storage.presets.get(&applied.preset) {
        if let Err(source) = delete_preset_rule(ctx.http(), guild_id, &preset.rule_name).await {
            warn!(?source, guild_id = guild_id.get(), "failed to delete the automod rule");
        }
    }

    ctx.say(format!(
        "Preset **{}** removed. The platform rule was deleted where possible.",
        applied.preset
    ))
    .await?;

    Ok(())
}
