use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, usage_message};
use crate::{CommandMeta, find_meta, require_permission};
use sable_core::{CommandFailure, Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "togglecommand",
    desc: "Enable or disable a command in this server.",
    category: "admin",
    usage: "?togglecommand <command> <on|off>",
};

#[poise::command(prefix_command, slash_command, category = "Admin")]
pub async fn togglecommand(
    ctx: Context<'_>,
    #[description = "The command to toggle"] command: Option<String>,
    #[description = "Whether the command should be enabled"] enabled: Option<bool>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_GUILD).await?;

    let (Some(command), Some(enabled)) = (command, enabled) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let command = command.trim().trim_start_matches(sable_utils::COMMAND_PREFIX);
    let Some(meta) = find_meta(command) else {
        return Err(CommandFailure::NotFound(format!(
            "There is no command named `{command}`."
        ))
        .into());
    };

    // The kill switch must not be able to lock itself out.
    if meta.name == META.name {
        return Err(CommandFailure::Validation(
            "This command cannot be toggled.".to_string(),
        )
        .into());
    }

    ctx.data()
        .storage
        .command_toggles
        .set_enabled(guild_id.get(), meta.name, enabled)
        .await?;

    ctx.say(format!(
        "`{}` is now **{}** in this server.",
        meta.name,
        if enabled { "enabled" } else { "disabled" }
    ))
    .await?;

    Ok(())
}
