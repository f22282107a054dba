use poise::serenity_prelude as serenity;

/// Resolve a member's effective guild-level permissions.
///
/// The guild owner gets everything; otherwise role permissions are unioned,
/// including the implicit everyone role.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let roles = guild_id.roles(http).await?;

    let mut resolved = serenity::Permissions::empty();
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    for role in roles.values() {
        if role.id == everyone_role_id || member.roles.contains(&role.id) {
            resolved |= role.permissions;
        }
    }

    Ok(resolved)
}

pub async fn has_user_permission(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
    required: serenity::Permissions,
) -> anyhow::Result<bool> {
    let perms = resolve_user_permissions(http, guild_id, user_id).await?;

    Ok(perms.contains(serenity::Permissions::ADMINISTRATOR) || perms.contains(required))
}

/// Whether the member outranks or ties the target in the role hierarchy.
/// Moderation actions require the caller to sit strictly above the target.
pub async fn caller_outranks_target(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    caller_id: serenity::UserId,
    target_id: serenity::UserId,
) -> anyhow::Result<bool> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == caller_id {
        return Ok(true);
    }
    if guild.owner_id == target_id {
        return Ok(false);
    }

    let roles = guild_id.roles(http).await?;
    let caller = guild_id.member(http, caller_id).await?;
    let target = guild_id.member(http, target_id).await?;

    let top_position = |member: &serenity::Member| {
        member
            .roles
            .iter()
            .filter_map(|role_id| roles.get(role_id))
            .map(|role| role.position)
            .max()
            .unwrap_or(0)
    };

    Ok(top_position(&caller) > top_position(&target))
}
