//! Session capabilities handed to command handlers
//!
//! Handlers never touch serenity directly: everything they need from the live
//! connection goes through [`Session`], so they can run against
//! [`MockSession`] in tests.

use std::sync::Arc;
use std::time::Duration;

use serenity::async_trait;
use serenity::cache::Cache;
use serenity::gateway::{ShardManager, ShardRunnerInfo};
use serenity::http::Http;
use serenity::model::id::{GuildId, ShardId, UserId};
use serenity::prelude::TypeMapKey;
use slash_bot_types::GuildSnapshot;
use tracing::debug;

use crate::errors::SessionError;

/// Days of message history removed together with a ban
pub const BAN_DELETE_MESSAGE_DAYS: u8 = 1;

#[async_trait]
pub trait Session: Send + Sync {
    /// Round-trip time of the last gateway heartbeat; `None` until the first
    /// heartbeat is acknowledged.
    async fn latency(&self) -> Option<Duration>;

    async fn guild(&self, guild_id: u64) -> Result<GuildSnapshot, SessionError>;

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), SessionError>;

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), SessionError>;
}

/// Shard manager handle stored in the client's data map so event handlers can
/// read shard latency.
pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

/// [`Session`] backed by a live serenity client
pub struct SerenitySession {
    http: Arc<Http>,
    cache: Arc<Cache>,
    shard_manager: Option<Arc<ShardManager>>,
    shard_id: ShardId,
}

impl SerenitySession {
    pub fn new(
        http: Arc<Http>,
        cache: Arc<Cache>,
        shard_manager: Option<Arc<ShardManager>>,
        shard_id: ShardId,
    ) -> Self {
        Self {
            http,
            cache,
            shard_manager,
            shard_id,
        }
    }

    fn cached_guild(&self, guild_id: GuildId) -> Option<GuildSnapshot> {
        let guild = guild_id.to_guild_cached(&self.cache)?;
        Some(GuildSnapshot {
            id: guild.id.get(),
            name: guild.name.clone(),
            member_count: guild.member_count,
            icon_url: guild.icon_url(),
        })
    }
}

#[async_trait]
impl Session for SerenitySession {
    async fn latency(&self) -> Option<Duration> {
        let manager = self.shard_manager.as_ref()?;
        let runners = manager.runners.lock().await;
        runners
            .get(&self.shard_id)
            .and_then(|runner: &ShardRunnerInfo| runner.latency)
    }

    async fn guild(&self, guild_id: u64) -> Result<GuildSnapshot, SessionError> {
        let id = GuildId::new(guild_id);
        if let Some(snapshot) = self.cached_guild(id) {
            return Ok(snapshot);
        }

        debug!("Guild {} not cached, fetching over HTTP", guild_id);
        let guild = self
            .http
            .get_guild_with_counts(id)
            .await
            .map_err(|e| SessionError::from_serenity("guild lookup", &e))?;

        Ok(GuildSnapshot {
            id: guild.id.get(),
            name: guild.name.clone(),
            member_count: guild.approximate_member_count.unwrap_or_default(),
            icon_url: guild.icon_url(),
        })
    }

    async fn kick(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), SessionError> {
        GuildId::new(guild_id)
            .kick_with_reason(&*self.http, UserId::new(user_id), reason)
            .await
            .map_err(|e| SessionError::from_serenity("kick", &e))
    }

    async fn ban(&self, guild_id: u64, user_id: u64, reason: &str) -> Result<(), SessionError> {
        GuildId::new(guild_id)
            .ban_with_reason(
                &*self.http,
                UserId::new(user_id),
                BAN_DELETE_MESSAGE_DAYS,
                reason,
            )
            .await
            .map_err(|e| SessionError::from_serenity("ban", &e))
    }
}

#[cfg(test)]
pub(crate) use mock::MockSession;
