//! Slash command handlers and the name → handler dispatch table

use std::collections::HashMap;

use serenity::async_trait;
use slash_bot_types::commands::{self, CommandDefinition};
use slash_bot_types::{CommandOutcome, OptionError, Reply, SlashInvocation};
use tracing::{debug, warn};

use crate::session::Session;

/// Unwraps a required option or returns the ephemeral error reply
macro_rules! require {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => return $crate::commands::option_error_reply(err),
        }
    };
}

#[path = "registry_tests.rs"]
mod registry_tests;

mod info;
mod moderation;
mod text;

pub use info::{HelloCommand, PingCommand, ServerInfoCommand, UserInfoCommand};
pub use moderation::{BanCommand, KickCommand};
pub use text::{EmbedCommand, SayCommand};

/// Reply for guild-only commands used in a DM
pub const GUILD_ONLY: &str = "This command can only be used in a server.";

/// One slash command.
///
/// Handlers are stateless; everything they need arrives through the session
/// and the invocation.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Static definition this handler serves
    fn definition(&self) -> &'static CommandDefinition;

    async fn handle(&self, session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome;
}

/// Turn an option error into the ephemeral reply shown to the invoker
pub(crate) fn option_error_reply(err: OptionError) -> CommandOutcome {
    CommandOutcome::Reply(Reply::ephemeral(err.to_string()))
}

/// Dispatch table from command name to handler
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with every built-in command
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(PingCommand);
        registry.register(HelloCommand);
        registry.register(UserInfoCommand);
        registry.register(ServerInfoCommand);
        registry.register(SayCommand);
        registry.register(EmbedCommand);
        registry.register(KickCommand);
        registry.register(BanCommand);
        registry
    }

    /// Add a handler, replacing any previous handler for the same name
    pub fn register<H: CommandHandler + 'static>(&mut self, handler: H) {
        let name = handler.definition().name;
        if self.handlers.insert(name, Box::new(handler)).is_some() {
            warn!("Replaced handler for command '{}'", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.handlers.get(name).map(|h| h.as_ref())
    }

    /// Registered command names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Definitions to push to Discord, in the canonical declaration order
    pub fn definitions(&self) -> Vec<&'static CommandDefinition> {
        let mut defs: Vec<_> = self.handlers.values().map(|h| h.definition()).collect();
        defs.sort_by_key(|d| {
            commands::DEFINITIONS
                .iter()
                .position(|known| known.name == d.name)
                .unwrap_or(usize::MAX)
        });
        defs
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `invocation` and return the single reply to send.
    pub async fn dispatch(&self, session: &dyn Session, invocation: &SlashInvocation) -> Reply {
        let Some(handler) = self.get(&invocation.command_name) else {
            warn!("No handler for command '{}'", invocation.command_name);
            return Reply::ephemeral(format!("Unknown command: {}", invocation.command_name));
        };

        debug!(
            "Dispatching /{} for user {} (interaction {})",
            invocation.command_name, invocation.user.id, invocation.interaction_id
        );

        let outcome = handler.handle(session, invocation).await;
        if let CommandOutcome::PermissionDenied(_) = &outcome {
            debug!(
                "Denied /{} for user {}",
                invocation.command_name, invocation.user.id
            );
        }
        outcome.into_reply()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
