//! Inbound slash command invocations
//!
//! A [`SlashInvocation`] is the gateway-independent view of one command
//! interaction: who invoked it, where, and with which resolved options.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{DiscordUser, TargetMember};

/// Guild authority flags held by the invoker in the invoking guild.
///
/// Discord computes these for the interaction; outside a guild they are all
/// false.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokerPermissions {
    pub administrator: bool,
    pub kick_members: bool,
    pub ban_members: bool,
}

impl InvokerPermissions {
    pub fn can_kick(&self) -> bool {
        self.administrator || self.kick_members
    }

    pub fn can_ban(&self) -> bool {
        self.administrator || self.ban_members
    }
}

/// Command option value, resolved from the interaction payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CommandOptionValue {
    String(String),
    User(Box<TargetMember>),
}

/// Command option (slash command argument)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommandOption {
    pub name: String,
    pub value: CommandOptionValue,
}

/// Why a required option could not be read
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OptionError {
    #[error("Missing required option: {0}")]
    Missing(String),

    #[error("Option '{name}' has the wrong type (expected {expected})")]
    WrongType { name: String, expected: &'static str },
}

/// A slash command was invoked
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SlashInvocation {
    pub interaction_id: u64,
    pub command_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub user: DiscordUser,
    #[serde(default)]
    pub permissions: InvokerPermissions,
    #[serde(default)]
    pub options: Vec<CommandOption>,
}

impl SlashInvocation {
    fn option(&self, name: &str) -> Option<&CommandOptionValue> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.value)
    }

    /// String option, `None` when absent
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>, OptionError> {
        match self.option(name) {
            None => Ok(None),
            Some(CommandOptionValue::String(s)) => Ok(Some(s)),
            Some(_) => Err(OptionError::WrongType {
                name: name.to_string(),
                expected: "string",
            }),
        }
    }

    pub fn required_str(&self, name: &str) -> Result<&str, OptionError> {
        self.optional_str(name)?
            .ok_or_else(|| OptionError::Missing(name.to_string()))
    }

    pub fn required_member(&self, name: &str) -> Result<&TargetMember, OptionError> {
        match self.option(name) {
            None => Err(OptionError::Missing(name.to_string())),
            Some(CommandOptionValue::User(m)) => Ok(m),
            Some(_) => Err(OptionError::WrongType {
                name: name.to_string(),
                expected: "user",
            }),
        }
    }
}
