use crate::CommandMeta;
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "ping",
    desc: "Check the bot's gateway latency.",
    category: "utility",
    usage: "?ping",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let latency = ctx.ping().await;
    if latency.is_zero() {
        // The first heartbeat hasn't been acknowledged yet.
        ctx.say("Pong! (latency not measured yet)").await?;
    } else {
        ctx.say(format!("Pong! `{}ms`", latency.as_millis())).await?;
    }

    Ok(())
}
