//! Configuration management for slash-bot

#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

/// Environment variables holding the bot token, in lookup order
const TOKEN_VARS: [&str; 2] = ["DISCORD_BOT_TOKEN", "TOKEN"];

/// Read-only access to process environment variables
pub trait ReadEnv {
    fn var(&self, key: &str) -> Option<String>;
}

/// Delegates to `std::env`
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub discord: DiscordBotConfig,
}

/// Discord bot specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordBotConfig {
    /// Bot token from the Discord developer portal
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
    /// Register commands to this guild only instead of globally.
    /// Guild commands update instantly; global ones can take up to an hour.
    #[serde(default)]
    pub guild_commands_guild_id: Option<u64>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_env_impl(&SystemEnv)
    }

    pub(crate) fn from_env_impl<E: ReadEnv>(env: &E) -> Result<Self> {
        let bot_token = token_from(env).unwrap_or_default();

        let guild_commands_guild_id = match env.var("DISCORD_GUILD_ID") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("DISCORD_GUILD_ID is not a valid id: {}", raw))?,
            ),
            _ => None,
        };

        Ok(Config {
            discord: DiscordBotConfig {
                bot_token,
                guild_commands_guild_id,
            },
        })
    }

    /// Reject configurations the bot cannot start with.
    pub fn validate(&self) -> Result<()> {
        if self.discord.bot_token.trim().is_empty() {
            bail!(
                "Discord bot token not set (use --bot-token, {} or {})",
                TOKEN_VARS[0],
                TOKEN_VARS[1]
            );
        }
        Ok(())
    }
}

fn token_from<E: ReadEnv>(env: &E) -> Option<String> {
    TOKEN_VARS
        .iter()
        .filter_map(|key| env.var(key))
        .find(|v| !v.trim().is_empty())
}

fn default_bot_token() -> String {
    token_from(&SystemEnv).unwrap_or_default()
}
