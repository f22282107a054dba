pub mod admin;
pub mod antiraid;
pub mod automod;
pub mod minigames;
pub mod moderation;
pub mod royale;
pub mod social;
pub mod utility;
pub mod voice;

use poise::serenity_prelude as serenity;

use sable_core::{CommandFailure, Context, Data, Error};
use sable_utils::permissions::has_user_permission;

pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    moderation::mute::META,
    moderation::unmute::META,
    moderation::warn::META,
    moderation::warnings::META,
    moderation::delwarn::META,
    moderation::clearwarns::META,
    moderation::kick::META,
    moderation::ban::META,
    moderation::unban::META,
    moderation::setlogs::META,
    moderation::clear::META,
    automod::setup::META,
    automod::force_update::META,
    automod::show_config::META,
    automod::clear_config::META,
    automod::set_log_channel::META,
    antiraid::META,
    voice::move_member::META,
    voice::vc_mute::META,
    voice::vc_unmute::META,
    voice::deafen::META,
    voice::undeafen::META,
    voice::kickvc::META,
    royale::knockout::META,
    royale::revive::META,
    royale::royalstats::META,
    royale::prestige::META,
    minigames::coinflip::META,
    minigames::dice::META,
    minigames::eightball::META,
    minigames::rps::META,
    minigames::trivia::META,
    minigames::guessnumber::META,
    social::hug::META,
    social::pat::META,
    social::snuggle::META,
    admin::togglecommand::META,
    utility::ping::META,
    utility::uptime::META,
    utility::botinfo::META,
];

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        moderation::mute::mute(),
        moderation::unmute::unmute(),
        moderation::warn::warn(),
        moderation::warnings::warnings(),
        moderation::delwarn::delwarn(),
        moderation::clearwarns::clearwarns(),
        moderation::kick::kick(),
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::setlogs::setlogs(),
        moderation::clear::clear(),
        automod::setup::setup(),
        automod::force_update::force_update(),
        automod::show_config::show_config(),
        automod::clear_config::clear_config(),
        automod::set_log_channel::set_log_channel(),
        antiraid::antiraid(),
        voice::move_member::move_member(),
        voice::vc_mute::vc_mute(),
        voice::vc_unmute::vc_unmute(),
        voice::deafen::deafen(),
        voice::undeafen::undeafen(),
        voice::kickvc::kickvc(),
        royale::knockout::knockout(),
        royale::revive::revive(),
        royale::royalstats::royalstats(),
        royale::prestige::prestige(),
        minigames::coinflip::coinflip(),
        minigames::dice::dice(),
        minigames::eightball::eightball(),
        minigames::rps::rps(),
        minigames::trivia::trivia(),
        minigames::guessnumber::guessnumber(),
        social::hug::hug(),
        social::pat::pat(),
        social::snuggle::snuggle(),
        admin::togglecommand::togglecommand(),
        utility::ping::ping(),
        utility::uptime::uptime(),
        utility::botinfo::botinfo(),
    ]
}

/// Look up a command's metadata by name.
pub fn find_meta(name: &str) -> Option<&'static CommandMeta> {
    COMMANDS.iter().find(|meta| meta.name == name)
}

/// Fail with `PermissionDenied` unless the author holds `required` (or is
/// an administrator) in the guild.
pub async fn require_permission(
    ctx: &Context<'_>,
    guild_id: serenity::GuildId,
    required: serenity::Permissions,
) -> Result<(), Error> {
    if has_user_permission(ctx.http(), guild_id, ctx.author().id, required).await? {
        Ok(())
    } else {
        Err(CommandFailure::PermissionDenied.into())
    }
}

/// Fail with `CommandDisabled` when the guild has toggled this command off.
pub async fn ensure_command_enabled(
    ctx: &Context<'_>,
    guild_id: serenity::GuildId,
) -> Result<(), Error> {
    let name = ctx.command().name.as_str();
    let enabled = ctx
        .data()
        .storage
        .command_toggles
        .is_enabled(guild_id.get(), name)
        .await;

    if enabled {
        Ok(())
    } else {
        Err(CommandFailure::CommandDisabled.into())
    }
}

/// Whether the author boosts the configured support guild. Lookup failures
/// count as not boosted.
pub async fn is_boosted(ctx: &Context<'_>) -> bool {
    let Some(support_guild_id) = ctx.data().support_guild_id else {
        return false;
    };

    match serenity::GuildId::new(support_guild_id)
        .member(ctx.http(), ctx.author().id)
        .await
    {
        Ok(member) => member.premium_since.is_some(),
        Err(_) => false,
    }
}

/// Cooldown scope key for the invoking user.
pub fn user_scope_key(ctx: &Context<'_>) -> String {
    ctx.author().id.to_string()
}

/// Classify a failed platform call: missing permissions and rate limits get
/// their own user-facing answers, everything else stays unexpected.
pub fn map_platform_error(source: serenity::Error) -> Error {
    if moderation::embeds::is_missing_permissions_error(&source) {
        CommandFailure::Forbidden.into()
    } else if sable_utils::retry::is_rate_limited_error(&source) {
        CommandFailure::RateLimited.into()
    } else {
        source.into()
    }
}
