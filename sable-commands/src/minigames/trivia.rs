use rand::Rng;

use super::{REPLY_TIMEOUT, await_player_reply};
use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};
use sable_utils::embed::basic_embed;

pub const META: CommandMeta = CommandMeta {
    name: "trivia",
    desc: "Answer a trivia question.",
    category: "minigames",
    usage: "?trivia",
};

const QUESTIONS: &[(&str, &str)] = &[
    ("What planet is known as the Red Planet?", "mars"),
    ("How many continents are there on Earth?", "7"),
    ("What is the largest ocean on Earth?", "pacific"),
    ("What gas do plants absorb from the atmosphere?", "carbon dioxide"),
    ("What is the chemical symbol for gold?", "au"),
    ("How many sides does a hexagon have?", "6"),
    ("What is the capital of Japan?", "tokyo"),
    ("Which animal is the tallest in the world?", "giraffe"),
    ("What is the smallest prime number?", "2"),
    ("In which year did the first human walk on the Moon?", "1969"),
];

fn answer_matches(expected: &str, given: &str) -> bool {
    given.trim().to_lowercase().contains(expected)
}

#[poise::command(prefix_command, slash_command, category = "Minigames")]
pub async fn trivia(ctx: Context<'_>) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let (question, answer) = { QUESTIONS[rand::thread_rng().gen_range(0..QUESTIONS.len())] };

    ctx.send(
        poise::CreateReply::default().embed(basic_embed(
            "Trivia",
            &format!(
                "{question}\n\n*You have {} seconds to answer.*",
                REPLY_TIMEOUT.as_secs()
            ),
        )),
    )
    .await?;

    match await_player_reply(&ctx).await {
        Some(reply) if answer_matches(answer, &reply.content) => {
            ctx.say("✅ Correct!").await?;
        }
        Some(_) => {
            ctx.say(format!("❌ Nope. The answer was **{answer}**."))
                .await?;
        }
        None => {
            ctx.say(format!("⏰ Time's up! The answer was **{answer}**."))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::answer_matches;

    #[test]
    fn answers_match_ignoring_case_and_padding() {
        assert!(answer_matches("mars", "  MARS "));
        assert!(answer_matches("tokyo", "it's Tokyo, I think"));
        assert!(!answer_matches("mars", "venus"));
    }
}
