//! Outbound interaction replies

use serde::{Deserialize, Serialize};

use crate::types::Embed;

/// Who can see a reply
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Visible to the whole channel
    #[default]
    Public,
    /// Visible only to the invoking user
    Ephemeral,
}

/// Content of a reply: plain text or a single embed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ReplyBody {
    Text(String),
    Embed(Embed),
}

/// The single terminal response to an interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reply {
    pub body: ReplyBody,
    #[serde(default)]
    pub visibility: Visibility,
}

impl Reply {
    /// Public text reply
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(content.into()),
            visibility: Visibility::Public,
        }
    }

    /// Public embed reply
    pub fn embed(embed: Embed) -> Self {
        Self {
            body: ReplyBody::Embed(embed),
            visibility: Visibility::Public,
        }
    }

    /// Text reply visible only to the invoker
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            body: ReplyBody::Text(content.into()),
            visibility: Visibility::Ephemeral,
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.visibility == Visibility::Ephemeral
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.body {
            ReplyBody::Text(s) => Some(s),
            ReplyBody::Embed(_) => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match &self.body {
            ReplyBody::Embed(e) => Some(e),
            ReplyBody::Text(_) => None,
        }
    }
}

/// What a command handler produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Reply(Reply),
    /// The invoker lacks the authority the command requires. Nothing was
    /// attempted.
    PermissionDenied(String),
}

impl CommandOutcome {
    /// Collapse into the reply that goes over the wire. Denials are always
    /// ephemeral.
    pub fn into_reply(self) -> Reply {
        match self {
            Self::Reply(reply) => reply,
            Self::PermissionDenied(message) => Reply::ephemeral(message),
        }
    }
}

impl From<Reply> for CommandOutcome {
    fn from(reply: Reply) -> Self {
        Self::Reply(reply)
    }
}
