use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, target_profile_from_user, usage_message};
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{Context, Error};
use sable_store::time::parse_timestamp_lenient;
use sable_utils::embed::DEFAULT_EMBED_COLOR;
use sable_utils::formatting::sanitize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "warnings",
    desc: "List a user's warnings.",
    category: "moderation",
    usage: "?warnings <user>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn warnings(
    ctx: Context<'_>,
    #[description = "The user to inspect"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_MESSAGES).await?;

    let Some(user) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let listed = ctx
        .data()
        .storage
        .warnings
        .list(guild_id.get(), user.id.get())
        .await;

    let profile = target_profile_from_user(&user);
    if listed.is_empty() {
        ctx.say(format!("{} has no warnings.", profile.display_name))
            .await?;
        return Ok(());
    }

    let lines: Vec<String> = listed
        .iter()
        .enumerate()
        .map(|(position, record)| {
            let when = parse_timestamp_lenient(&record.timestamp)
                .map(|stamp| format!("<t:{}:R>", stamp.timestamp()))
                .unwrap_or_else(|| record.timestamp.clone());
            format!(
                "**{}.** {} (by <@{}>, {})",
                position + 1,
                sanitize_mentions(&record.reason),
                record.moderator,
                when
            )
        })
        .collect();

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!(
            "Warnings for {} ({})",
            profile.display_name,
            listed.len()
        ))
        .description(lines.join("\n"));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
