pub mod botinfo;
pub mod ping;
pub mod uptime;
