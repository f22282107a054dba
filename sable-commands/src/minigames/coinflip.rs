use rand::Rng;

use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "coinflip",
    desc: "Flip a coin.",
    category: "minigames",
    usage: "?coinflip",
};

#[poise::command(prefix_command, slash_command, category = "Minigames")]
pub async fn coinflip(ctx: Context<'_>) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let heads = { rand::thread_rng().gen_bool(0.5) };
    ctx.say(if heads {
        "🪙 **Heads!**"
    } else {
        "🪙 **Tails!**"
    })
    .await?;

    Ok(())
}
