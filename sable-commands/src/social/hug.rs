use poise::serenity_prelude as serenity;

use super::run_social_action;
use crate::CommandMeta;
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "hug",
    desc: "Give someone a hug.",
    category: "social",
    usage: "?hug <user>",
};

#[poise::command(prefix_command, slash_command, category = "Social")]
pub async fn hug(
    ctx: Context<'_>,
    #[description = "Who to hug"] user: serenity::User,
) -> Result<(), Error> {
    run_social_action(&ctx, &user, "hug", "hugs", "🤗", "Your arms are tired.").await
}
