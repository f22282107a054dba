use rand::Rng;

use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{CommandFailure, Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "dice",
    desc: "Roll a die.",
    category: "minigames",
    usage: "?dice [sides]",
};

const MAX_SIDES: u32 = 1000;

#[poise::command(prefix_command, slash_command, category = "Minigames")]
pub async fn dice(
    ctx: Context<'_>,
    #[description = "Number of sides; defaults to 6"] sides: Option<u32>,
) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let sides = sides.unwrap_or(6);
    if sides < 2 || sides > MAX_SIDES {
        return Err(CommandFailure::Validation(format!(
            "Sides must be between 2 and {MAX_SIDES}."
        ))
        .into());
    }

    let rolled = { rand::thread_rng().gen_range(1..=sides) };
    ctx.say(format!("🎲 You rolled a **{rolled}** (d{sides})."))
        .await?;

    Ok(())
}
