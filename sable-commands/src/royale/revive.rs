use poise::serenity_prelude as serenity;
use rand::Rng;

use crate::moderation::embeds::{guild_only_message, usage_message};
use crate::royale::{ReviveOutcome, roll_revive};
use crate::{
    CommandMeta, ensure_command_enabled, is_boosted, map_platform_error, user_scope_key,
};
use sable_core::{CommandFailure, Context, Error};
use sable_utils::embed::{ALERT_EMBED_COLOR, DEFAULT_EMBED_COLOR};
use sable_utils::formatting::format_compact_duration;
use sable_utils::retry::retry_rate_limited;

pub const META: CommandMeta = CommandMeta {
    name: "revive",
    desc: "Try to revive a knocked-out user.",
    category: "royale",
    usage: "?revive <user>",
};

const MIRACLE_XP: u64 = 50;

#[poise::command(prefix_command, slash_command, category = "Royale")]
pub async fn revive(
    ctx: Context<'_>,
    #[description = "The user to revive"] user: Option<serenity::User>,
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

    let data = ctx.data();

    // Only knockout victims are revivable.
    if data.storage.deathlog.get(target.id.get()).await.is_none() {
        return Err(
            CommandFailure::NotFound(format!("{} isn't knocked out.", target.name)).into(),
        );
    }

    let scope_key = user_scope_key(&ctx);
    let boosted = is_boosted(&ctx).await;

    let remaining = data.cooldowns.revive.remaining(&scope_key, boosted).await;
    if remaining > std::time::Duration::ZERO {
        ctx.send(poise::CreateReply::default().ephemeral(true).content(format!(
            "Your medkit is recharging. Try again in {}.",
            format_compact_duration(remaining.as_secs().max(1))
        )))
        .await?;
        return Ok(());
    }

    let (outcome, base_xp) = {
        let mut rng = rand::thread_rng();
        (roll_revive(&mut rng), rng.gen_range(15..=30))
    };

    data.cooldowns.revive.trigger(&scope_key).await;

    if outcome == ReviveOutcome::Fail {
        data.storage
            .stats
            .record_revive(ctx.author().id.get(), false)
            .await?;

        let embed = serenity::CreateEmbed::new()
            .color(ALERT_EMBED_COLOR)
            .title("Revive failed")
            .description(format!("{} stays down. Better luck next time.", target.name));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    }

    retry_rate_limited(|| {
        let edit = serenity::EditMember::new().enable_communication();
        guild_id.edit_member(ctx.http(), target.id, edit)
    })
    .await
    .map_err(map_platform_error)?;

    data.storage.deathlog.take(target.id.get()).await?;
    data.storage
        .stats
        .record_revive(ctx.author().id.get(), true)
        .await?;

    let xp = if outcome == ReviveOutcome::Miracle {
        MIRACLE_XP
    } else {
        base_xp
    };
    let progress = data.storage.stats.add_xp(ctx.author().id.get(), xp).await?;

    let title = if outcome == ReviveOutcome::Miracle {
        "Miracle revive!"
    } else {
        "Revive successful"
    };
    let mut description = format!("{} is back on their feet. **XP :** +{xp}", target.name);
    if progress.levels_gained > 0 {
        description.push_str(&format!(
            "\n**Level up!** You're now level {}.",
            progress.level
        ));
    }

    let embed = serenity::CreateEmbed::new()
        .color(DEFAULT_EMBED_COLOR)
        .title(title)
        .description(description);
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
