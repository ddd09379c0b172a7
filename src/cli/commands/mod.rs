//! CLI subcommands

pub mod button;
pub mod config;
pub mod replay;
