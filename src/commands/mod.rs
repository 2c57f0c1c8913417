//! CLI command implementations

pub mod clean;
pub mod export;
pub mod init;
pub mod list;
pub mod show;
