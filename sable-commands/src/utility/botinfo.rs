use crate::{COMMANDS, CommandMeta};
use sable_core::{Context, Error};
use sable_utils::embed::basic_embed;
use sable_utils::formatting::format_compact_duration;

pub const META: CommandMeta = CommandMeta {
    name: "botinfo",
    desc: "Show information about the bot.",
    category: "utility",
    usage: "?botinfo",
};

#[poise::command(prefix_command, slash_command, category = "Utility")]
pub async fn botinfo(ctx: Context<'_>) -> Result<(), Error> {
    let guild_count = ctx.cache().guilds().len();
    let uptime = format_compact_duration(ctx.data().started_at.elapsed().as_secs());

    let description = [
        format!("**Version :** {}", env!("CARGO_PKG_VERSION")),
        format!("**Servers :** {guild_count}"),
        format!("**Commands :** {}", COMMANDS.len()),
        format!("**Uptime :** {uptime}"),
    ]
    .join("\n");

    ctx.send(poise::CreateReply::default().embed(basic_embed("Sable", &description)))
        .await?;

    Ok(())
}
