use chrono::{Duration as ChronoDuration, Utc};
use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::moderation::embeds::{
    guild_only_message, moderation_bot_target_message, moderation_self_action_message,
    usage_message,
};
use crate::royale::{Outcome, flavor_line, pick_weapon, roll_outcome};
use crate::{
    CommandMeta, ensure_command_enabled, is_boosted, map_platform_error, user_scope_key,
};
use sable_core::{Context, Error};
use sable_store::DeathlogEntry;
use sable_utils::embed::{ALERT_EMBED_COLOR, DEFAULT_EMBED_COLOR};
use sable_utils::formatting::format_compact_duration;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "knockout",
    desc: "Take a swing at someone. A hit times them out.",
    category: "royale",
    usage: "?knockout <user>",
};

const XP_PER_TIMEOUT_MINUTE: u64 = 10;
const CRIT_XP_FACTOR: u64 = 2;

#[poise::command(prefix_command, slash_command, category = "Royale")]
pub async fn knockout(
    ctx: Context<'_>,
    #[description = "The user to knock out"] user: Option<serenity::User>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;

    let Some(target) = user else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    if target.bot {
        ctx.say(moderation_bot_target_message()).await?;
        return Ok(());
    }
    if target.id == ctx.author().id {
        ctx.say(moderation_self_action_message("knock out")).await?;
        return Ok(());
    }

    let data = ctx.data();
    let scope_key = user_scope_key(&ctx);
    let boosted = is_boosted(&ctx).await;

    let remaining = data.cooldowns.knockout.remaining(&scope_key, boosted).await;
    if remaining > std::time::Duration::ZERO {
        ctx.send(poise::CreateReply::default().ephemeral(true).content(format!(
            "You're still winding up. Try again in {}.",
            format_compact_duration(remaining.as_secs().max(1))
        )))
        .await?;
        return Ok(());
    }

    // All randomness happens in this block; the rng must not live across
    // an await.
    let rolled = {
        let mut rng = rand::thread_rng();
        let weapons = data.storage.weapons.all();
        pick_weapon(weapons, &mut rng).map(|(_, weapon)| {
            let outcome = roll_outcome(&mut rng);
            let timeout_secs = if weapon.timeouts.is_empty() {
                300
            } else if outcome == Outcome::Crit {
                weapon.timeouts.iter().copied().max().unwrap_or(300)
            } else {
                weapon.timeouts[rng.gen_range(0..weapon.timeouts.len())]
            };
            let line = match outcome {
                Outcome::Miss => flavor_line(&weapon.miss_lines, "{target} dodged!", &mut rng),
                Outcome::Hit => {
                    flavor_line(&weapon.hit_lines, "{target} got knocked out!", &mut rng)
                }
                Outcome::Crit => flavor_line(
                    &weapon.crit_lines,
                    "Critical hit! {target} got obliterated!",
                    &mut rng,
                ),
            };

            (
                weapon.title.clone(),
                outcome,
                timeout_secs,
                line.replace("{target}", &target.name),
            )
        })
    };
    let Some((weapon_title, outcome, timeout_secs, line)) = rolled else {
        ctx.say("The armory is empty.").await?;
        return Ok(());
    };

    data.cooldowns.knockout.trigger(&scope_key).await;

    if outcome == Outcome::Miss {
        let embed = serenity::CreateEmbed::new()
            .color(DEFAULT_EMBED_COLOR)
            .title(format!("Miss! ({weapon_title})"))
            .description(line);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    }

    let until = serenity::Timestamp::from_unix_timestamp(
        (Utc::now() + ChronoDuration::seconds(timeout_secs as i64)).timestamp(),
    )?;
    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().disable_communication_until_datetime(until);
        guild_id.edit_member(ctx.http(), target.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    let timeout_end = (Utc::now() + ChronoDuration::seconds(timeout_secs as i64)).to_rfc3339();
    data.storage
        .deathlog
        .record(
            target.id.get(),
            DeathlogEntry {
                by: ctx.author().id.get(),
                weapon: weapon_title.clone(),
                timeout_end,
                crit: outcome == Outcome::Crit,
            },
        )
        .await?;

    data.storage.stats.record_kill(ctx.author().id.get()).await?;
    data.storage.stats.record_death(target.id.get()).await?;

    let weapons = data.storage.weapons.all();
    let multiplier = weapons
        .values()
        .find(|weapon| weapon.title == weapon_title)
        .map_or(1.0, |weapon| weapon.xp_multiplier);
    let mut xp = ((timeout_secs / 60).max(1) * XP_PER_TIMEOUT_MINUTE) as f64 * multiplier;
    if outcome == Outcome::Crit {
        xp *= CRIT_XP_FACTOR as f64;
    }
    let progress = data
        .storage
        .stats
        .add_xp(ctx.author().id.get(), xp as u64)
        .await?;

    let mut description = format!(
        "{line}\n\n**Weapon :** {weapon_title}\n**Timeout :** {}\n**XP :** +{}",
        format_compact_duration(timeout_secs),
        xp as u64
    );
    if progress.levels_gained > 0 {
        description.push_str(&format!(
            "\n**Level up!** You're now level {}.",
            progress.level
        ));
    }

    let title = match outcome {
        Outcome::Crit => "Critical knockout!",
        _ => "Knockout!",
    };
    let embed = serenity::CreateEmbed::new()
        .color(ALERT_EMBED_COLOR)
        .title(title)
        .description(description);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
