//! CLI command handlers.

pub mod config;
pub mod interactive;
pub mod list;
pub mod show;
