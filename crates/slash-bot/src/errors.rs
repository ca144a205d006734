//! Discord-specific error handling for the bot.
//!
//! Converts serenity errors into classified [`ActionFailure`]s and logs them
//! at a level that matches their category.

use serenity::http::HttpError;
use slash_bot_types::errors::{ActionFailure, DiscordErrorCode, ErrorCategory};
use thiserror::Error;
use tracing::{error, warn};

/// A Discord call made on behalf of a command failed.
///
/// Displays as the raw Discord message so it can be shown to users as-is.
#[derive(Debug, Error)]
#[error("{}", .0.message)]
pub struct SessionError(pub ActionFailure);

impl SessionError {
    /// Classify and log a serenity error in one step.
    pub fn from_serenity(action: &str, err: &serenity::Error) -> Self {
        let failure = classify(action, err);
        log_failure(&failure);
        Self(failure)
    }
}

/// Classify a serenity `Error` raised while performing `action`.
pub fn classify(action: &str, err: &serenity::Error) -> ActionFailure {
    match err {
        serenity::Error::Http(http_err) => classify_http(action, http_err),
        serenity::Error::Model(model_err) => ActionFailure::new(
            action,
            DiscordErrorCode::InvalidFormBody,
            model_err.to_string(),
            0,
            0,
        ),
        _ => ActionFailure::new(
            action,
            DiscordErrorCode::NetworkError,
            err.to_string(),
            0,
            0,
        ),
    }
}

fn classify_http(action: &str, http_err: &HttpError) -> ActionFailure {
    match http_err {
        HttpError::UnsuccessfulRequest(resp) => {
            let status = resp.status_code.as_u16();
            let raw_code = resp.error.code as u32;
            let code = if status == 429 {
                DiscordErrorCode::RateLimited
            } else {
                DiscordErrorCode::from_raw(raw_code)
            };
            ActionFailure::new(action, code, resp.error.message.clone(), raw_code, status)
        }
        // Request never produced a Discord API response
        _ => ActionFailure::new(
            action,
            DiscordErrorCode::NetworkError,
            http_err.to_string(),
            0,
            0,
        ),
    }
}

/// Log a classified failure.
///
/// - Expected refusals (permissions, missing targets, bad input) → `warn!`
/// - Rate limits and network hiccups → `warn!`
/// - Anything unclassified → `error!`
pub fn log_failure(failure: &ActionFailure) {
    match failure.category {
        ErrorCategory::PermissionDenied | ErrorCategory::NotFound | ErrorCategory::InvalidInput => {
            warn!(
                "{} refused by Discord [{:?}] (HTTP {} / code {}): {}",
                failure.action,
                failure.error_code,
                failure.http_status,
                failure.raw_discord_code,
                failure.message
            );
        }
        ErrorCategory::RateLimit | ErrorCategory::Network => {
            warn!(
                "{} failed transiently [{:?}]: {}",
                failure.action, failure.error_code, failure.message
            );
        }
        ErrorCategory::Unknown => {
            error!(
                "{} failed [{:?}] (HTTP {} / code {}): {}",
                failure.action,
                failure.error_code,
                failure.http_status,
                failure.raw_discord_code,
                failure.message
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Constructing serenity HTTP errors needs a live response, so these
    // tests cover the non-HTTP branches and the error wrapper.

    #[test]
    fn test_classify_non_http_error_is_network() {
        let err = serenity::Error::Other("socket closed");
        let failure = classify("kick", &err);
        assert_eq!(failure.action, "kick");
        assert_eq!(failure.error_code, DiscordErrorCode::NetworkError);
        assert_eq!(failure.category, ErrorCategory::Network);
        assert_eq!(failure.http_status, 0);
        assert!(!failure.is_permanent());
    }

    #[test]
    fn test_session_error_displays_discord_message() {
        let err = SessionError(ActionFailure::new(
            "ban",
            DiscordErrorCode::MissingPermissions,
            "Missing Permissions",
            50013,
            403,
        ));
        assert_eq!(err.to_string(), "Missing Permissions");
    }

    #[test]
    fn test_from_serenity_keeps_action() {
        let err = SessionError::from_serenity("guild lookup", &serenity::Error::Other("boom"));
        assert_eq!(err.0.action, "guild lookup");
        assert_eq!(err.to_string(), "boom");
    }
}
