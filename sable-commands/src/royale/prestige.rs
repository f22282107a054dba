use crate::moderation::embeds::guild_only_message;
use crate::{CommandMeta, ensure_command_enabled};
use sable_core::{CommandFailure, Context, Error};
use sable_store::MAX_LEVEL;
use sable_utils::embed::basic_embed;
use sable_utils::formatting::prestige_stars;

pub const META: CommandMeta = CommandMeta {
    name: "prestige",
    desc: "Trade your capped level for a prestige star.",
    category: "royale",
    usage: "?prestige",
};

#[poise::command(prefix_command, slash_command, category = "Royale")]
pub async fn prestige(ctx: Context<'_>) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;

    let Some(count) = ctx
        .data()
        .storage
        .stats
        .prestige(ctx.author().id.get())
        .await?
    else {
        return Err(CommandFailure::Validation(format!(
            "You need to reach level {MAX_LEVEL} before you can prestige."
        ))
        .into());
    };

    let embed = basic_embed(
        "Prestige!",
        format!(
            "Level and XP reset. You now wear {} (prestige {count}).",
            prestige_stars(count)
        ),
    );
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
