//! Discord API error classification.
//!
//! Only the JSON error codes a slash-command bot actually runs into are named;
//! everything else falls through to [`DiscordErrorCode::Unknown`].

use serde::{Deserialize, Serialize};

/// High-level category of a Discord API error.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Rate limit hit.
    RateLimit,
    /// Target resource (guild, member, interaction …) not found.
    NotFound,
    /// The bot lacks permission, or the target outranks it.
    PermissionDenied,
    /// Malformed or semantically invalid request.
    InvalidInput,
    /// Network or I/O error (transient).
    Network,
    /// Unknown or uncategorised error.
    Unknown,
}

/// Discord-specific error code
/// (<https://discord.com/developers/docs/topics/opcodes-and-status-codes#json>).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiscordErrorCode {
    /// 10004: Unknown guild.
    UnknownGuild,
    /// 10007: Unknown member (already left or never joined).
    UnknownMember,
    /// 10013: Unknown user.
    UnknownUser,
    /// 10062: Unknown interaction (token expired).
    UnknownInteraction,
    /// 40060: Interaction has already been acknowledged.
    AlreadyAcknowledged,
    /// 50001: Missing access.
    MissingAccess,
    /// 50013: Missing permissions (also returned when the target outranks the bot).
    MissingPermissions,
    /// HTTP 429.
    RateLimited,
    /// 50035: Invalid form body.
    InvalidFormBody,
    /// 40001 / 50014: Invalid or expired token.
    InvalidToken,
    /// 130000: API resource overloaded.
    ApiOverloaded,
    /// Client-side network or I/O error.
    NetworkError,
    Unknown,
}

impl DiscordErrorCode {
    /// Derive the code from a raw Discord JSON error code integer.
    pub fn from_raw(code: u32) -> Self {
        match code {
            10004 => Self::UnknownGuild,
            10007 => Self::UnknownMember,
            10013 => Self::UnknownUser,
            10062 => Self::UnknownInteraction,
            40060 => Self::AlreadyAcknowledged,
            50001 => Self::MissingAccess,
            50013 => Self::MissingPermissions,
            50035 => Self::InvalidFormBody,
            40001 | 50014 => Self::InvalidToken,
            130000 => Self::ApiOverloaded,
            _ => Self::Unknown,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownGuild
            | Self::UnknownMember
            | Self::UnknownUser
            | Self::UnknownInteraction => ErrorCategory::NotFound,
            Self::MissingAccess | Self::MissingPermissions => ErrorCategory::PermissionDenied,
            Self::RateLimited => ErrorCategory::RateLimit,
            Self::AlreadyAcknowledged | Self::InvalidFormBody => ErrorCategory::InvalidInput,
            Self::NetworkError => ErrorCategory::Network,
            Self::InvalidToken | Self::ApiOverloaded | Self::Unknown => ErrorCategory::Unknown,
        }
    }

    /// True if repeating the same request cannot succeed.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::NotFound | ErrorCategory::PermissionDenied | ErrorCategory::InvalidInput
        ) || *self == Self::InvalidToken
    }
}

/// A classified failure of a Discord API call made on behalf of a command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionFailure {
    /// What was being attempted (e.g. `kick`, `reply`).
    pub action: String,
    pub error_code: DiscordErrorCode,
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// Raw Discord JSON error code (0 if not an API error).
    pub raw_discord_code: u32,
    /// HTTP status code (0 if not an HTTP error).
    pub http_status: u16,
}

impl ActionFailure {
    pub fn new(
        action: impl Into<String>,
        error_code: DiscordErrorCode,
        message: impl Into<String>,
        raw_discord_code: u32,
        http_status: u16,
    ) -> Self {
        Self {
            action: action.into(),
            error_code,
            category: error_code.category(),
            message: message.into(),
            raw_discord_code,
            http_status,
        }
    }

    pub fn is_permanent(&self) -> bool {
        self.error_code.is_permanent()
    }
}
