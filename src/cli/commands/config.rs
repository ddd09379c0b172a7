//! Configuration management commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "launcher.locale", "downloads.start_paused")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "launcher.locale", "downloads.start_paused")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Get { key } => get(&key, format).await,
        ConfigCommands::Set { key, value } => set(&key, &value, quiet).await,
        ConfigCommands::Path => path(format).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

async fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["launcher", "locale"] => Ok(config.launcher.locale.clone()),
        ["launcher", "catalog"] => Ok(config
            .launcher
            .catalog
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|| "<not set>".to_string())),
        ["downloads", "start_paused"] => Ok(config.downloads.start_paused.to_string()),
        ["library", "games"] => Ok(config.library.games.len().to_string()),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

async fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["launcher", "locale"] => {
            config.launcher.locale = value.to_string();
        }
        ["launcher", "catalog"] => {
            config.launcher.catalog = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        ["downloads", "start_paused"] => {
            config.downloads.start_paused = value.parse()?;
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set_values() {
        let mut config = Config::default();

        set_config_value(&mut config, "downloads.start_paused", "true").unwrap();
        assert_eq!(get_config_value(&config, "downloads.start_paused").unwrap(), "true");

        set_config_value(&mut config, "launcher.catalog", "/tmp/fr.toml").unwrap();
        assert_eq!(get_config_value(&config, "launcher.catalog").unwrap(), "/tmp/fr.toml");

        set_config_value(&mut config, "launcher.catalog", "").unwrap();
        assert_eq!(get_config_value(&config, "launcher.catalog").unwrap(), "<not set>");

        assert_eq!(get_config_value(&config, "library.games").unwrap(), "0");
    }

    #[test]
    fn test_unknown_keys() {
        let mut config = Config::default();
        assert!(get_config_value(&config, "launcher.theme").is_err());
        assert!(set_config_value(&mut config, "library.games", "3").is_err());
        assert!(set_config_value(&mut config, "downloads.start_paused", "maybe").is_err());
    }
}
