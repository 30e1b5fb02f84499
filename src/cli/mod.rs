//! CLI subcommand implementations for the quotedeck binary.

pub mod cache_cmd;
pub mod copy_cmd;
pub mod doctor;
pub mod export_cmd;
pub mod fetch_cmd;
pub mod history_cmd;
pub mod output;
pub mod quote_cmd;
pub mod session;
pub mod share_cmd;
pub mod status_cmd;
pub mod surface;
