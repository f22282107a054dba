/// Generic embed builders shared across commands.
pub mod embed;
/// Shared formatting helpers.
pub mod formatting;
/// Pure parser helpers.
pub mod parse;
/// Permission helper utilities.
pub mod permissions;
/// Bounded retry for platform calls that can rate-limit.
pub mod retry;

/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '?';
