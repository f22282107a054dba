use rand::Rng;

use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "rps",
    desc: "Play rock-paper-scissors against the bot.",
    category: "minigames",
    usage: "?rps <rock|paper|scissors>",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum Hand {
    #[name = "rock"]
    Rock,
    #[name = "paper"]
    Paper,
    #[name = "scissors"]
    Scissors,
}

impl Hand {
    fn emoji(self) -> &'static str {
        match self {
            Hand::Rock => "🪨",
            Hand::Paper => "📄",
            Hand::Scissors => "✂️",
        }
    }

    fn beats(self) -> Hand {
        match self {
            Hand::Rock => Hand::Scissors,
            Hand::Paper => Hand::Rock,
            Hand::Scissors => Hand::Paper,
        }
    }
}

#[poise::command(prefix_command, slash_command, category = "Minigames")]
pub async fn rps(
    ctx: Context<'_>,
    #[description = "Your hand"] hand: Hand,
) -> Result<(), Error> {
    if let Some(guild_id) = ctx.guild_id() {
        ensure_command_enabled(&ctx, guild_id).await?;
    }

    let bot_hand = {
        match rand::thread_rng().gen_range(0..3) {
            0 => Hand::Rock,
            1 => Hand::Paper,
            _ => Hand::Scissors,
        }
    };

    let verdict = if hand == bot_hand {
        "It's a tie!"
    } else if hand.beats() == bot_hand {
        "You win!"
    } else {
        "I win!"
    };

    ctx.say(format!(
        "{} vs {} {verdict}",
        hand.emoji(),
        bot_hand.emoji()
    ))
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Hand;

    #[test]
    fn each_hand_beats_exactly_one_other() {
        assert_eq!(Hand::Rock.beats(), Hand::Scissors);
        assert_eq!(Hand::Paper.beats(), Hand::Rock);
        assert_eq!(Hand::Scissors.beats(), Hand::Paper);
    }
}
