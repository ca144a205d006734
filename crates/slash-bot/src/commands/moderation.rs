//! Moderation commands: /kick, /ban
//!
//! Both check the invoker's guild authority before touching Discord. A
//! failed remote action is reported publicly instead of being propagated, so
//! the interaction always gets its one reply.

use serenity::async_trait;
use slash_bot_types::commands::{CommandDefinition, BAN_COMMAND, KICK_COMMAND};
use slash_bot_types::{CommandOutcome, InvokerPermissions, Reply, SlashInvocation};
use tracing::info;

use super::{CommandHandler, GUILD_ONLY};
use crate::errors::SessionError;
use crate::session::Session;

pub const DEFAULT_REASON: &str = "No reason provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Kick,
    Ban,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Self::Kick => "kick",
            Self::Ban => "ban",
        }
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Kick => "kicked",
            Self::Ban => "banned",
        }
    }

    fn permitted(self, permissions: &InvokerPermissions) -> bool {
        match self {
            Self::Kick => permissions.can_kick(),
            Self::Ban => permissions.can_ban(),
        }
    }

    async fn perform(
        self,
        session: &dyn Session,
        guild_id: u64,
        user_id: u64,
        reason: &str,
    ) -> Result<(), SessionError> {
        match self {
            Self::Kick => session.kick(guild_id, user_id, reason).await,
            Self::Ban => session.ban(guild_id, user_id, reason).await,
        }
    }
}

async fn moderate(
    action: Action,
    session: &dyn Session,
    invocation: &SlashInvocation,
) -> CommandOutcome {
    // DMs carry no member permissions; the guild check comes first
    let Some(guild_id) = invocation.guild_id else {
        return Reply::ephemeral(GUILD_ONLY).into();
    };

    if !action.permitted(&invocation.permissions) {
        return CommandOutcome::PermissionDenied(format!(
            "You don't have permission to {} members.",
            action.verb()
        ));
    }

    let target = require!(invocation.required_member("user"));
    let reason = require!(invocation.optional_str("reason")).unwrap_or(DEFAULT_REASON);

    match action
        .perform(session, guild_id, target.user.id, reason)
        .await
    {
        Ok(()) => {
            info!(
                "User {} {} {} from guild {}: {}",
                invocation.user.id,
                action.past_tense(),
                target.user.id,
                guild_id,
                reason
            );
            Reply::text(format!(
                "{} has been {} for: {}",
                target.user.username,
                action.past_tense(),
                reason
            ))
            .into()
        }
        Err(e) => Reply::text(format!("Failed to {}: {}", action.verb(), e)).into(),
    }
}

pub struct KickCommand;

#[async_trait]
impl CommandHandler for KickCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &KICK_COMMAND
    }

    async fn handle(&self, session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        moderate(Action::Kick, session, invocation).await
    }
}

pub struct BanCommand;

#[async_trait]
impl CommandHandler for BanCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &BAN_COMMAND
    }

    async fn handle(&self, session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        moderate(Action::Ban, session, invocation).await
    }
}
