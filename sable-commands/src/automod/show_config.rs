use poise::serenity_prelude as serenity;

use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "show_config",
    desc: "Show this server's applied automod preset.",
    category: "automod",
    usage: "?show_config",
};

#[poise::command(prefix_command, slash_command, category = "Automod")]
pub async fn show_config(ctx: Context<'_>) -> Result<(), Error> {
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

    let mut lines = vec![format!("**Preset :** {}", applied.preset)];
    if let Some(preset) = storage.presets.get(&applied.preset) {
        lines.push(format!("**Rule name :** {}", preset.rule_name));
        if !preset.description.is_empty() {
            lines.push(format!("**Description :** {}", preset.description));
        }
        lines.push(format!(
            "**Filters :** {} keyword(s), {} regex pattern(s), {} allowed",
            preset.keyword_filter.len(),
            preset.regex_patterns.len(),
            preset.allowed_keywords.len()
        ));
    } else {
        lines.push("**Rule name :** (preset missing from the table)".to_owned());
    }
    lines.push(format!("**Applied hash :** `{}`", &applied.hash[..12.min(applied.hash.len())]));

    if let Some(channel_id) = storage.log_channels.get(guild_id.get()).await {
        lines.push(format!("**Alert channel :** <#{channel_id}>"));
    }

    let embed = basic_embed("Automod configuration", lines.join("\n"));
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
