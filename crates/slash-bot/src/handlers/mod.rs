//! Serenity event handler implementation

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serenity::async_trait;
use serenity::model::application::{Command, CommandInteraction, Interaction};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use tracing::{debug, error, info};

use crate::bridge::{convert_invocation, create_command, create_response};
use crate::commands::CommandRegistry;
use crate::errors::SessionError;
use crate::health::AppState;
use crate::session::{SerenitySession, ShardManagerContainer};

pub struct Handler {
    registry: Arc<CommandRegistry>,
    /// Register commands on this guild only (propagates instantly) instead of
    /// globally.
    guild_commands_guild_id: Option<u64>,
    registered: AtomicBool,
}

impl Handler {
    pub fn new(registry: Arc<CommandRegistry>, guild_commands_guild_id: Option<u64>) -> Self {
        Self {
            registry,
            guild_commands_guild_id,
            registered: AtomicBool::new(false),
        }
    }

    /// Run `push` on the first call only. Later calls, from `ready` after a
    /// reconnect, return `None` whether or not the first push succeeded.
    async fn register_once<F, Fut>(&self, push: F) -> Option<Result<usize, SessionError>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<usize, SessionError>>,
    {
        if self.registered.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(push().await)
    }

    async fn register_commands(&self, ctx: &Context) -> Result<usize, SessionError> {
        let commands: Vec<_> = self
            .registry
            .definitions()
            .into_iter()
            .map(create_command)
            .collect();

        let registered = match self.guild_commands_guild_id {
            Some(guild_id) => GuildId::new(guild_id)
                .set_commands(&ctx.http, commands)
                .await
                .map_err(|e| SessionError::from_serenity("register guild commands", &e))?,
            None => Command::set_global_commands(&ctx.http, commands)
                .await
                .map_err(|e| SessionError::from_serenity("register global commands", &e))?,
        };
        Ok(registered.len())
    }

    async fn handle_command(&self, ctx: &Context, cmd: &CommandInteraction) {
        let shard_manager = {
            let data = ctx.data.read().await;
            data.get::<ShardManagerContainer>().cloned()
        };
        if shard_manager.is_none() {
            debug!("Shard manager not found in context data, latency unavailable");
        }

        let session = SerenitySession::new(
            ctx.http.clone(),
            ctx.cache.clone(),
            shard_manager,
            ctx.shard_id,
        );
        let invocation = convert_invocation(cmd);
        let reply = self.registry.dispatch(&session, &invocation).await;

        if let Err(e) = cmd.create_response(&ctx.http, create_response(&reply)).await {
            let err = SessionError::from_serenity("reply", &e);
            error!(
                "Failed to reply to /{} (interaction {}): {}",
                invocation.command_name, invocation.interaction_id, err
            );
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(
            "Discord bot connected as {}#{:04}",
            ready.user.name,
            ready.user.discriminator.map_or(0, |d| d.get())
        );

        let health = {
            let data = ctx.data.read().await;
            data.get::<AppState>().cloned()
        };
        if let Some(health) = &health {
            health.set_bot_username(ready.user.name.clone()).await;
        }

        // Ready fires again after every session re-identify
        let Some(result) = self.register_once(|| self.register_commands(&ctx)).await else {
            debug!("Commands already registered, skipping");
            return;
        };

        match result {
            Ok(count) => {
                match self.guild_commands_guild_id {
                    Some(guild_id) => info!("Registered {} commands on guild {}", count, guild_id),
                    None => info!("Registered {} global commands", count),
                }
                if let Some(health) = &health {
                    health.mark_commands_registered();
                }
            }
            Err(e) => {
                // Commands registered by an earlier run keep working
                error!("Command registration failed, continuing without it: {}", e);
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(cmd) => self.handle_command(&ctx, &cmd).await,
            _ => {
                // Other interaction types (autocomplete, component, modal, ping) not handled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slash_bot_types::errors::{ActionFailure, DiscordErrorCode};
    use std::sync::atomic::AtomicUsize;

    fn handler() -> Handler {
        Handler::new(Arc::new(CommandRegistry::standard()), None)
    }

    fn rejected() -> SessionError {
        SessionError(ActionFailure::new(
            "register global commands",
            DiscordErrorCode::MissingAccess,
            "Missing Access",
            50001,
            403,
        ))
    }

    #[test]
    fn test_handler_starts_unregistered() {
        let handler = handler();
        assert!(!handler.registered.load(Ordering::SeqCst));
        assert!(handler.guild_commands_guild_id.is_none());
    }

    #[test]
    fn test_handler_builds_one_command_per_handler() {
        let registry = Arc::new(CommandRegistry::standard());
        let handler = Handler::new(registry.clone(), Some(200));
        let built: Vec<_> = handler
            .registry
            .definitions()
            .into_iter()
            .map(create_command)
            .collect();
        assert_eq!(built.len(), registry.len());
        assert_eq!(handler.guild_commands_guild_id, Some(200));
    }

    #[tokio::test]
    async fn test_register_once_skips_later_ready_events() {
        let handler = handler();
        let counter = AtomicUsize::new(0);
        let pushes = &counter;
        let push = move || async move {
            pushes.fetch_add(1, Ordering::SeqCst);
            Ok(8)
        };

        let first = handler.register_once(push).await;
        assert_eq!(first.map(|r| r.ok()), Some(Some(8)));

        for _ in 0..3 {
            assert!(handler.register_once(push).await.is_none());
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_registration_is_not_retried() {
        let handler = handler();
        let counter = AtomicUsize::new(0);
        let pushes = &counter;
        let push = move || async move {
            pushes.fetch_add(1, Ordering::SeqCst);
            Err(rejected())
        };

        let first = handler.register_once(push).await.expect("first push runs");
        assert_eq!(first.unwrap_err().to_string(), "Missing Access");

        assert!(handler.register_once(push).await.is_none());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(handler.registered.load(Ordering::SeqCst));
    }
}
