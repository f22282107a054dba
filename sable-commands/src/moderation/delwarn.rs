use poise::serenity_prelude as serenity;

use crate::moderation::embeds::{
    guild_only_message, moderation_action_embed, target_profile_from_user, usage_message,
};
use crate::moderation::notify::publish_to_log_channel;
use crate::{CommandMeta, ensure_command_enabled, require_permission};
use sable_core::{CommandFailure, Context, Error};
use sable_store::WarningStoreError;

pub const META: CommandMeta = CommandMeta {
    name: "delwarn",
    desc: "Delete one of a user's warnings by its number.",
    category: "moderation",
    usage: "?delwarn <user> <number>",
};

#[poise::command(prefix_command, slash_command, category = "Moderation")]
pub async fn delwarn(
    ctx: Context<'_>,
    #[description = "The user whose warning to delete"] user: Option<serenity::User>,
    #[description = "Warning number, as shown by ?warnings"] number: Option<usize>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say(guild_only_message()).await?;
        return Ok(());
    };

    ensure_command_enabled(&ctx, guild_id).await?;
    require_permission(&ctx, guild_id, serenity::Permissions::MANAGE_MESSAGES).await?;

    let (Some(user), Some(number)) = (user, number) else {
        ctx.say(usage_message(META.usage)).await?;
        return Ok(());
    };

    let removed = match ctx
        .data()
        .storage
        .warnings
        .delete_at(guild_id.get(), user.id.get(), number)
        .await
    {
        Ok(removed) => removed,
        Err(err) => {
            return Err(match err.downcast_ref::<WarningStoreError>() {
                Some(WarningStoreError::NotFound) => {
                    CommandFailure::NotFound(WarningStoreError::NotFound.to_string()).into()
                }
                Some(out_of_range @ WarningStoreError::IndexOutOfRange { .. }) => {
                    CommandFailure::Validation(out_of_range.to_string()).into()
                }
                None => err,
            });
        }
    };

    let target_profile = target_profile_from_user(&user);
    let embed = moderation_action_embed(
        &target_profile,
        user.id,
        ctx.author().id,
        &format!("cleared of warning #{number}"),
        Some(&removed.reason),
        None,
    );

    publish_to_log_channel(ctx.http(), &ctx.data().storage, guild_id, embed.clone()).await;
    ctx.send(poise::CreateReply::default().embed(embed)).await?;

    Ok(())
}
