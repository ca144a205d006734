//! Slash command definitions registered with Discord
//!
//! The set is static: it is built into the binary, pushed to Discord once per
//! process, and never changes while the bot runs.

use serde::Serialize;

pub const PING: &str = "ping";
pub const HELLO: &str = "hello";
pub const USERINFO: &str = "userinfo";
pub const SERVERINFO: &str = "serverinfo";
pub const SAY: &str = "say";
pub const EMBED: &str = "embed";
pub const KICK: &str = "kick";
pub const BAN: &str = "ban";

/// Type of a command option as declared to Discord
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    User,
    String,
}

/// A single declared option (slash command argument)
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

impl OptionDefinition {
    const fn required(name: &'static str, description: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
        }
    }

    const fn optional(name: &'static str, description: &'static str, kind: OptionKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: false,
        }
    }
}

/// A slash command as registered with Discord
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionDefinition],
}

pub const PING_COMMAND: CommandDefinition = CommandDefinition {
    name: PING,
    description: "Check bot latency",
    options: &[],
};

pub const HELLO_COMMAND: CommandDefinition = CommandDefinition {
    name: HELLO,
    description: "Say hello to the bot",
    options: &[],
};

pub const USERINFO_COMMAND: CommandDefinition = CommandDefinition {
    name: USERINFO,
    description: "Get info about a user",
    options: &[OptionDefinition::required(
        "user",
        "Select a user",
        OptionKind::User,
    )],
};

pub const SERVERINFO_COMMAND: CommandDefinition = CommandDefinition {
    name: SERVERINFO,
    description: "Get server information",
    options: &[],
};

pub const SAY_COMMAND: CommandDefinition = CommandDefinition {
    name: SAY,
    description: "Make the bot say something",
    options: &[OptionDefinition::required(
        "message",
        "The message to say",
        OptionKind::String,
    )],
};

pub const EMBED_COMMAND: CommandDefinition = CommandDefinition {
    name: EMBED,
    description: "Send a custom embed",
    options: &[
        OptionDefinition::required("title", "Embed title", OptionKind::String),
        OptionDefinition::required("description", "Embed description", OptionKind::String),
    ],
};

pub const KICK_COMMAND: CommandDefinition = CommandDefinition {
    name: KICK,
    description: "Kick a member from the server",
    options: &[
        OptionDefinition::required("user", "Member to kick", OptionKind::User),
        OptionDefinition::optional("reason", "Reason for kick", OptionKind::String),
    ],
};

pub const BAN_COMMAND: CommandDefinition = CommandDefinition {
    name: BAN,
    description: "Ban a member from the server",
    options: &[
        OptionDefinition::required("user", "Member to ban", OptionKind::User),
        OptionDefinition::optional("reason", "Reason for ban", OptionKind::String),
    ],
};

/// Every command the bot registers, in registration order.
pub const DEFINITIONS: &[CommandDefinition] = &[
    PING_COMMAND,
    HELLO_COMMAND,
    USERINFO_COMMAND,
    SERVERINFO_COMMAND,
    SAY_COMMAND,
    EMBED_COMMAND,
    KICK_COMMAND,
    BAN_COMMAND,
];

/// Find a definition by command name
pub fn find(name: &str) -> Option<&'static CommandDefinition> {
    DEFINITIONS.iter().find(|d| d.name == name)
}
