use poise::serenity_prelude as serenity;

use super::run_social_action;
use crate::CommandMeta;
use sable_core::{Context, Error};

pub const META: CommandMeta = CommandMeta {
    name: "snuggle",
    desc: "Snuggle up to someone.",
    category: "social",
    usage: "?snuggle <user>",
};

#[poise::command(prefix_command, slash_command, category = "Social")]
pub async fn snuggle(
    ctx: Context<'_>,
    #[description = "Who to snuggle"] user: serenity::User,
) -> Result<(), Error> {
    run_social_action(&ctx, &user, "snuggle", "snuggles", "🥰", "You need some space first.").await
}
