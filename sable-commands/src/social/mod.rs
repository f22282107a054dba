pub mod hug;
pub mod pat;
pub mod snuggle;

use std::time::Duration;

use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::moderation::embeds::guild_only_message;
use crate::{ensure_command_enabled, is_boosted};
use sable_core::{Context, Error};
use sable_utils::embed::DEFAULT_EMBED_COLOR;

/// Shared flow for the gif-backed interaction commands: guild gate,
/// per-user per-action cooldown, random gif from the table, embed reply.
pub(crate) async fn run_social_action(
    ctx: &Context<'_>,
    target: &serenity::User,
    action: &str,
    verb: &str,
    emoji: &str,
    recharge_line: &str,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(ctx, guild_id).await?;

    let cooldown = &ctx.data().cooldowns.social;
    let scope_key = format!("{action}:{}", ctx.author().id);
    let boosted = is_boosted(ctx).await;
    let remaining = cooldown.remaining(&scope_key, boosted).await;
    if remaining > Duration::ZERO {
        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "{recharge_line} Try again in {} second(s).",
                    remaining.as_secs().max(1)
                ))
                .ephemeral(true),
        )
        .await?;
        return Ok(());
    }
    cooldown.trigger(&scope_key).await;

    let gif = {
        let urls = ctx.data().storage.gifs.urls_for(action);
        if urls.is_empty() {
            None
        } else {
            Some(urls[rand::thread_rng().gen_range(0..urls.len())].clone())
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .description(format!(
            "<@{}> {verb} <@{}>! {emoji}",
            ctx.author().id,
            target.id
        ));
    if let Some(url) = gif {
        embed = embed.image(url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
