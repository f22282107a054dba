use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{guild_only_message, target_profile_from_user};
use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};
use sable_utils::embed::DEFAULT_EMBED_COLOR;
use sable_utils::formatting::{format_kd_ratio, prestige_stars};
use sable_store::{MAX_LEVEL, xp_to_next_level};

pub const META: CommandMeta = CommandMeta {
    name: "royalstats",
    desc: "Show a player's royale stats.",
    category: "royale",
    usage: "?royalstats [user]",
};

#[poise::command(prefix_command, slash_command, category = "Royale")]
pub async fn royalstats(
    ctx: Context<'_>,
    #[description = "The player to inspect; defaults to you"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;

    let target = user.unwrap_or_else(|| ctx.author().clone());
    let stats = ctx.data().storage.stats.get(target.id.get()).await;
    let profile = target_profile_from_user(&target);

    let level_line = if stats.level >= MAX_LEVEL {
        format!("**Level :** {} (max)", stats.level)
    } else {
        format!(
            "**Level :** {} ({}/{} XP)",
            stats.level,
            stats.xp,
            xp_to_next_level(stats.level)
        )
    };

    let mut lines = vec![
        format!("**Knockouts :** {}", stats.kills),
        format!("**Knocked out :** {}", stats.deaths),
        format!("**K/D :** {}", format_kd_ratio(stats.kills, stats.deaths)),
        format!(
            "**Revives :** {} ({} failed)",
            stats.revives, stats.failed_revives
        ),
        level_line,
    ];
    if stats.prestige > 0 {
        lines.push(format!("**Prestige :** {}", prestige_stars(stats.prestige)));
    }

    let mut embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(format!("Royale stats for {}", profile.display_name))
        .description(lines.join("\n"));
    if let Some(url) = profile.avatar_url.as_deref() {
        embed = embed.thumbnail(url);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
