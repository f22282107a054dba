use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{Context, Error};
use sable_utils::embed::{ALERT_EMBED_COLOR, DEFAULT_EMBED_COLOR};

pub const META: CommandMeta = CommandMeta {
    name: "antiraid",
    desc: "Toggle the anti-raid lockdown for this server.",
    category: "moderation",
    usage: "?antiraid <on|off>",
};

const LOCKDOWN_SLOWMODE_SECS: u16 = 5;

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn antiraid(
    ctx: Context<'_>,
    #[description = "Turn the lockdown on or off"] enabled: Option<bool>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::ADMINISTRATOR).await?;

    let Some(enabled) = enabled else {
        let active = ctx.data().antiraid.read().await.contains(&guild_id.get());
        ctx.say(if active {
            "Anti-raid lockdown is **active**."
        } else {
            "Anti-raid lockdown is off."
        })
        .await?;
        return Ok(());
    };

    {
        let mut lockdowns = ctx.data().antiraid.write().await;
        if enabled {
            lockdowns.insert(guild_id.get());
        } else {
            lockdowns.remove(&guild_id.get());
        }
    }

    let slowmode = if enabled { LOCKDOWN_SLOWMODE_SECS } else { 0 };
    apply_slowmode(ctx.http(), guild_id, slowmode).await;

    let embed = if enabled {
        serenity::CreateEmbed::new()
            .color(ALERT_EMBED_COLOR)
            .title("Anti-raid lockdown enabled")
            .description(
                "Messages from non-admins will be removed and their authors \
                 timed out until the lockdown is lifted. Slowmode is active \
                 on all text channels.",
            )
    } else {
        serenity::CreateEmbed::new()
            .color(DEFAULT_EMBED_COLOR)
            .title("Anti-raid lockdown lifted")
            .description("Slowmode has been reverted. Carry on.")
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}

/// Set slowmode on every text channel, best-effort per channel.
async fn apply_slowmode(http: &serenity::Http, guild_id: serenity::GuildId, seconds: u16) {
    let channels = match guild_id.channels(http).await {
        Ok(channels) => channels,
        Err(source) => {
            warn!(?source, guild_id = guild_id.get(), "failed to list channels for slowmode");
            return;
        }
    };

    for (channel_id, channel) in channels {
        if channel.kind != serenity::ChannelType::Text {
            continue;
        }

        let edit = serenity::EditChannel::new().rate_limit_per_user(seconds);
        if let Err(source) = channel_id.edit(http, edit).await {
            warn!(?source, channel_id = channel_id.get(), "failed to set slowmode");
        }
    }
}
