pub mod deafen;
pub mod kickvc;
pub mod move_member;
pub mod undeafen;
pub mod vc_mute;
pub mod vc_unmute;

use poise::serenity_prelude as serenity;

use sable_core::{CommandFailure, Context, Error};

/// The voice channel the user currently sits in, from the gateway cache.
pub(crate) fn member_voice_channel(
    ctx: &Context<'_>,
    user_id: serenity::UserId,
) -> Option<serenity::ChannelId> {
    let guild = ctx.guild()?;
    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
}

/// Voice commands only make sense against a connected target.
pub(crate) fn require_target_in_voice(
    ctx: &Context<'_>,
    user: &serenity::User,
) -> Result<serenity::ChannelId, Error> {
    member_voice_channel(ctx, user.id).ok_or_else(|| {
        CommandFailure::NotFound(format!("{} is not in a voice channel.", user.name)).into()
    })
}
