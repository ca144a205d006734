//! Informational commands: /ping, /hello, /userinfo, /serverinfo

use std::time::Duration;

use serenity::async_trait;
use slash_bot_types::commands::{
    CommandDefinition, HELLO_COMMAND, PING_COMMAND, SERVERINFO_COMMAND, USERINFO_COMMAND,
};
use slash_bot_types::{CommandOutcome, Embed, Reply, SlashInvocation};

use super::{CommandHandler, GUILD_ONLY};
use crate::session::Session;

/// Embed colour for /userinfo (Discord "green")
pub const USERINFO_COLOR: u32 = 0x2ECC71;
/// Embed colour for /serverinfo (Discord "blue")
pub const SERVERINFO_COLOR: u32 = 0x3498DB;

/// Latency in whole milliseconds, rounded to nearest. No measurement → 0.
pub fn latency_millis(latency: Option<Duration>) -> u64 {
    latency
        .map(|d| ((d.as_micros() + 500) / 1000) as u64)
        .unwrap_or(0)
}

pub struct PingCommand;

#[async_trait]
impl CommandHandler for PingCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &PING_COMMAND
    }

    async fn handle(&self, session: &dyn Session, _invocation: &SlashInvocation) -> CommandOutcome {
        let ms = latency_millis(session.latency().await);
        Reply::text(format!("Pong! Latency: {}ms", ms)).into()
    }
}

pub struct HelloCommand;

#[async_trait]
impl CommandHandler for HelloCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &HELLO_COMMAND
    }

    async fn handle(&self, _session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        Reply::text(format!(
            "Hi {}! I'm your slash bot.",
            invocation.user.mention()
        ))
        .into()
    }
}

pub struct UserInfoCommand;

#[async_trait]
impl CommandHandler for UserInfoCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &USERINFO_COMMAND
    }

    async fn handle(&self, _session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        let member = require!(invocation.required_member("user"));

        let joined = member
            .joined_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let embed = Embed::new()
            .title(format!("{}'s Info", member.display_name()))
            .color(USERINFO_COLOR)
            .field("Username", &member.user.username)
            .field("ID", member.user.id)
            .field("Joined at", joined)
            .thumbnail(&member.avatar_url);

        Reply::embed(embed).into()
    }
}

pub struct ServerInfoCommand;

#[async_trait]
impl CommandHandler for ServerInfoCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &SERVERINFO_COMMAND
    }

    async fn handle(&self, session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        let Some(guild_id) = invocation.guild_id else {
            return Reply::ephemeral(GUILD_ONLY).into();
        };

        let guild = match session.guild(guild_id).await {
            Ok(guild) => guild,
            Err(e) => return Reply::text(format!("Failed to fetch server info: {}", e)).into(),
        };

        let embed = Embed::new()
            .title(format!("{} Info", guild.name))
            .color(SERVERINFO_COLOR)
            .field("Server Name", &guild.name)
            .field("Server ID", guild.id)
            .field("Members", guild.member_count)
            .thumbnail(guild.icon_url.unwrap_or_default());

        Reply::embed(embed).into()
    }
}
