use poise::serenity_prelude as serenity;

use super::run_social_action;
use crate::CommandMeta;
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "pat",
    desc: "Pat someone on the head.",
    category: "social",
    usage: "?pat <user>",
};

#[poise::command(prefix_command, slash_command, category = "Social")]
pub async fn pat(
    ctx: Context<'_>,
    #[description = "Who to pat"] user: serenity::User,
) -> Result<(), Error> {
    run_social_action(&ctx, &user, "pat", "pats", "🫳", "Your hand needs a rest.").await
}
