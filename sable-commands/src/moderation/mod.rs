pub mod ban;
pub mod clear;
pub mod clearwarns;
pub mod delwarn;
pub mod embeds;
pub mod kick;
pub mod mute;
pub mod notify;
pub mod setlogs;
pub mod unban;
pub mod unmute;
pub mod warn;
pub mod warnings;

pub use embeds::{is_missing_permissions_error, send_moderation_target_dm_for_guild};
pub use notify::publish_to_log_channel;
