use poise::serenity_prelude as serenity;

use crate::automod::{ApplyOptions, apply_preset_rule};
use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, map_platform_error, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_store::{AppliedPreset, hash_preset};
use sable_utils::embed::basic_embed;
use sable_utils::parse::parse_id_list;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "setup",
    desc: "Apply an automod preset to this server.",
    category: "automod",
    usage: "?setup <preset> [exempt roles] [exempt channels]",
};

#[poise::command(prefix_command, slash_command, category = "Automod")]
pub async fn setup(
    ctx: Context<'_>,
    #[description = "Preset to apply"] preset: Option<String>,
    #[description = "Roles exempt from the rule (mentions or ids)"] exempt_roles: Option<String>,
    #[description = "Channels exempt from the rule (mentions or ids)"] exempt_channels: Option<
        String,
    >,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_GUILD).await?;

    let storage = &ctx.data().storage;

    let Some(preset_name) = preset else {
        let available: Vec<&str> = storage.presets.names().collect();
        ctx.say(format!("Available presets: {}", available.join(", ")))
            .await?;
        return Ok(());
    };

    let Some(preset) = storage.presets.get(&preset_name) else {
        let available: Vec<&str> = storage.presets.names().collect();
        return Err(CommandFailure::NotFound(format!(
            "Unknown preset `{preset_name}`. Available: {}",
            available.join(", ")
        ))
        .into());
    };

    let options = ApplyOptions {
        exempt_roles: parse_exempt_list(exempt_roles.as_deref())?,
        exempt_channels: parse_exempt_list(exempt_channels.as_deref())?,
        alert_channel: storage.log_channels.get(guild_id.get()).await,
    };

    retry_rate_limited(|| apply_preset_rule(ctx.http(), guild_id, preset, &options))
        .await
        .map_err(map_platform_error)?;

    let hash = hash_preset(preset)?;
    storage
        .applied_presets
        .set(
            guild_id.get(),
            AppliedPreset {
                preset: preset_name.clone(),
                hash,
            },
        )
        .await?;

    let embed = basic_embed(
        "Automod configured",
        format!(
            "Preset **{preset_name}** is now active as rule **{}**.\n{}",
            preset.rule_name, preset.description
        ),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

pub(crate) fn parse_exempt_list(raw: Option<&str>) -> Result<Vec<u64>, Error> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    parse_id_list(raw).map_err(|invalid| CommandFailure::Validation(invalid.to_string()).into())
}
