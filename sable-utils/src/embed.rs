use poise::serenity_prelude as serenity;

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x5E_4B_8B;

/// Color for destructive or alarming notices (lockdowns, knockouts).
pub const ALERT_EMBED_COLOR: u32 = 0xC0_3A_2B;

/// Build a titled embed with the standard styling.
pub fn basic_embed(title: &str, description: impl Into<String>) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(title.to_owned())
        .color(DEFAULT_EMBED_COLOR)
        .description(description)
}
