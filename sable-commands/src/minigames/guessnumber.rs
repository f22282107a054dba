use rand::Rng;

use super::await_player_reply;
use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};
use sable_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "guessnumber",
    desc: "Guess the secret number between 1 and 100.",
    category: "minigames",
    usage: "?guessnumber",
};

const MAX_GUESSES: u32 = 5;

#[poise::command(prefix_command, slash_command, category = "Minigames")]
pub async fn guessnumber(ctx: Context<'_>) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let secret: u32 = { rand::thread_rng().gen_range(1..=100) };

    ctx.send(poise::CreateReply::default().embed(basic_embed(
        "Guess the number",
        &format!(
            "I'm thinking of a number between 1 and 100. You have {MAX_GUESSES} guesses; \
             type each one in this channel."
        ),
    )))
    .await?;

    for attempt in 1..=MAX_GUESSES {
        let Some(reply) = await_player_reply(&ctx).await else {
            ctx.say(format!("⏰ Time's up! The number was **{secret}**."))
                .await?;
            return Ok(());
        };

        let Ok(guess) = reply.content.trim().parse::<u32>() else {
            let remaining = MAX_GUESSES - attempt;
            ctx.say(format!(
                "That's not a number. {remaining} guess(es) left."
            ))
            .await?;
            continue;
        };

        if guess == secret {
            ctx.say(format!(
                "🎉 **{secret}** is right! Got it in {attempt} guess(es)."
            ))
            .await?;
            return Ok(());
        }

        let remaining = MAX_GUESSES - attempt;
        let hint = if guess < secret { "higher" } else { "lower" };
        if remaining > 0 {
            ctx.say(format!("Go {hint}. {remaining} guess(es) left."))
                .await?;
        }
    }

    ctx.say(format!("Out of guesses! The number was **{secret}**."))
        .await?;

    Ok(())
}
