use rand::Rng;

use crate::moderation::embeds::usage_message;
use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};
use sable_utils::formatting::sanitize_mentions;

pub const META: CommandMeta = CommandMeta {
    name: "8ball",
    desc: "Ask the magic 8-ball a question.",
    category: "minigames",
    usage: "?8ball <question>",
};

const ANSWERS: &[&str] = &[
    "It is certain.",
    "Without a doubt.",
    "Yes, definitely.",
    "Most likely.",
    "Signs point to yes.",
    "Reply hazy, try again.",
    "Ask again later.",
    "Better not tell you now.",
    "Don't count on it.",
    "My reply is no.",
    "Very doubtful.",
    "Outlook not so good.",
];

#[poise::command(prefix_command, slash_command, rename = "8ball", category = "Minigames")]
pub async fn eightball(
    ctx: Context<'_>,
    #[description = "Your question"]
    #[rest]
    question: Option<String>,
) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let Some(question) = question else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let answer = { ANSWERS[rand::thread_rng().gen_range(0..ANSWERS.len())] };
    ctx.say(format!(
        "🎱 *{}*\n**{answer}**",
        sanitize_mentions(question.trim())
    ))
    .await?;

    Ok(())
}
