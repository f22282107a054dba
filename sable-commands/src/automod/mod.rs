pub mod clear_config;
pub mod force_update;
pub mod set_log_channel;
pub mod setup;
pub mod show_config;

use poise::serenity_prelude as serenity;
use serenity::model::guild::automod::{Action, EventType, Trigger};

use sable_store::AutomodPreset;

#[derive(Debug, Default)]
pub(crate) struct ApplyOptions {
    pub exempt_roles: Vec<u64>,
    pub exempt_channels: Vec<u64>,
    pub alert_channel: Option<u64>,
}

/// Upsert the preset's rule on the platform, keyed by its fixed rule name:
/// edit when a rule with that name already exists, create otherwise. Always
/// attempted in full; there is no short-circuit on identical content.
pub(crate) async fn apply_preset_rule(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    preset: &AutomodPreset,
    options: &ApplyOptions,
) -> Result<(), serenity::Error> {
    let rule = build_rule(preset, options);

    let existing = guild_id.automod_rules(http).await?;
    match existing.iter().find(|rule| rule.name == preset.rule_name) {
        Some(found) => {
            guild_id.edit_automod_rule(http, found.id, rule).await?;
        }
        None => {
            guild_id.create_automod_rule(http, rule).await?;
        }
    }

    Ok(())
}

/// Best-effort removal of the preset's platform rule.
pub(crate) async fn delete_preset_rule(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    rule_name: &str,
) -> Result<bool, serenity::Error> {
    let existing = guild_id.automod_rules(http).await?;
    let Some(found) = existing.iter().find(|rule| rule.name == rule_name) else {
        return Ok(false);
    };

    guild_id.delete_automod_rule(http, found.id).await?;
    Ok(true)
}

fn build_rule(preset: &AutomodPreset, options: &ApplyOptions) -> serenity::EditAutoModRule<'static> {
    let mut actions = vec![Action::BlockMessage {
        custom_message: None,
    }];
    if let Some(alert_channel) = options.alert_channel {
        actions.push(Action::Alert(serenity::ChannelId::new(alert_channel)));
    }

    let mut rule = serenity::EditAutoModRule::new()
        .name(preset.rule_name.clone())
        .event_type(EventType::MessageSend)
        .trigger(Trigger::Keyword {
            strings: preset.keyword_filter.clone(),
            regex_patterns: preset.regex_patterns.clone(),
            allow_list: preset.allowed_keywords.clone(),
        })
        .actions(actions)
        .enabled(true);

    if !options.exempt_roles.is_empty() {
        rule = rule.exempt_roles(
            options
                .exempt_roles
                .iter()
                .map(|&id| serenity::RoleId::new(id)),
        );
    }
    if !options.exempt_channels.is_empty() {
        rule = rule.exempt_channels(
            options
                .exempt_channels
                .iter()
                .map(|&id| serenity::ChannelId::new(id)),
        );
    }

    rule
}
