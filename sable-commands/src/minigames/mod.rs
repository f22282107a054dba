pub mod coinflip;
pub mod dice;
pub mod eightball;
pub mod guessnumber;
pub mod rps;
pub mod trivia;

use std::time::Duration;

use poise::serenity_prelude::Message;
use serenity::collector::MessageCollector;

use sable_core::Context;

pub(crate) const REPLY_TIMEOUT: Duration = Duration::from_secs(20);

/// Await the invoker's next message in this channel. The command suspends
/// here without blocking other handlers; `None` means they never answered.
pub(crate) async fn await_player_reply(ctx: &Context<'_>) -> Option<Message> {
    MessageCollector::new(ctx.serenity_context().shard.clone())
        .channel_id(ctx.channel_id())
        .author_id(ctx.author().id)
        .timeout(REPLY_TIMEOUT)
        .await
}
