use poise::serenity_prelude as serenity;

use crate::automod::{ApplyOptions, apply_preset_rule};
use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_store::{AppliedPreset, hash_preset};
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "force_update",
    desc: "Re-apply this server's automod preset from the current table.",
    category: "automod",
    usage: "?force_update",
};

#[poise::command(prefix_command, slash_command, category = "Automod")]
pub async fn force_update(ctx: Context<'_>) -> Result<(), Error> {
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

    let Some(preset) = storage.presets.get(&applied.preset) else {
        return Err(CommandFailure::NotFound(format!(
            "Preset `{}` no longer exists in the preset table.",
            applied.preset
        ))
        .into());
    };

    let options = ApplyOptions {
        alert_channel: storage.log_channels.get(guild_id.get()).await,
        ..ApplyOptions::default()
    };

    retry_rate_limited(|| apply_preset_rule(ctx.http(), guild_id, preset, &options))
        .await
        .map_err(map_platform_error)?;

    let hash = hash_preset(preset)?;
    let changed = hash != applied.hash;
    storage
        .applied_presets
        .set(
            guild_id.get(),
            AppliedPreset {
                preset: applied.preset.clone(),
                hash,
            },
        )
        .await?;

    let note = if changed {
        "the preset had changed since it was last applied"
    } else {
        "the preset was unchanged"
    };
    ctx.say(format!(
        "Re-applied preset **{}** ({note}).",
        applied.preset
    ))
    .await?;

    Ok(())
}
