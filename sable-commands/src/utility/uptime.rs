use crate::CommandMeta;
use sable_core::{Context, Error};
use sable_utils::formatting::format_compact_duration;

pub const META: CommandMeta = CommandMeta {
    name: "uptime",
    desc: "Show how long the bot has been running.",
    category: "utility",
    usage: "?uptime",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn uptime(ctx: Context<'_>) -> Result<(), Error> {
    let elapsed = ctx.data().started_at.elapsed().as_secs();
    ctx.say(format!("Up for **{}**.", format_compact_duration(elapsed)))
        .await?;

    Ok(())
}
