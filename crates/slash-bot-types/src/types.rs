//! Core Discord domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Discord user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiscordUser {
    pub id: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    pub bot: bool,
}

impl DiscordUser {
    /// Mention markup that pings the user when rendered (`<@id>`)
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }

    /// Global display name, falling back to the username
    pub fn display_name(&self) -> &str {
        self.global_name.as_deref().unwrap_or(&self.username)
    }
}

/// Snapshot of a guild (server) taken when a command needs it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    pub member_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// A user resolved from a `User` command option.
///
/// `joined_at` and `nick` are only present when the user is a member of the
/// guild the command was invoked in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TargetMember {
    pub user: DiscordUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl TargetMember {
    /// Guild nickname, then global name, then username
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .unwrap_or_else(|| self.user.display_name())
    }
}

/// Embed field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Embed image or thumbnail (just a URL)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedMedia {
    pub url: String,
}

/// Message embed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<EmbedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<EmbedMedia>,
}

impl Embed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// Append an inline field. Field order is preserved.
    pub fn field(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.to_string(),
            inline: true,
        });
        self
    }

    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(EmbedMedia { url: url.into() });
        self
    }

    /// Look up a field value by name
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn user(global_name: Option<&str>) -> DiscordUser {
        DiscordUser {
            id: 42,
            username: "alice".to_string(),
            global_name: global_name.map(String::from),
            bot: false,
        }
    }

    #[test]
    fn test_mention_format() {
        assert_eq!(user(None).mention(), "<@42>");
    }

    #[test]
    fn test_user_display_name_prefers_global_name() {
        assert_eq!(user(Some("Alice A.")).display_name(), "Alice A.");
        assert_eq!(user(None).display_name(), "alice");
    }

    #[test]
    fn test_member_display_name_prefers_nick() {
        let member = TargetMember {
            user: user(Some("Alice A.")),
            nick: Some("ally".to_string()),
            avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
            joined_at: None,
        };
        assert_eq!(member.display_name(), "ally");

        let member = TargetMember { nick: None, ..member };
        assert_eq!(member.display_name(), "Alice A.");
    }

    #[test]
    fn test_embed_builder_keeps_field_order() {
        let embed = Embed::new()
            .title("t")
            .field("first", 1)
            .field("second", "two")
            .field("third", 3u64);
        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
        assert_eq!(embed.field_value("second"), Some("two"));
        assert_eq!(embed.field_value("missing"), None);
    }

    #[test]
    fn test_embed_omits_empty_optionals_in_json() {
        let json = serde_json::to_value(Embed::new().title("only title")).unwrap();
        assert_eq!(json["title"], "only title");
        assert!(json.get("description").is_none());
        assert!(json.get("color").is_none());
        assert!(json.get("thumbnail").is_none());
    }

    #[test]
    fn test_target_member_serde_joined_at() {
        let member = TargetMember {
            user: user(None),
            nick: None,
            avatar_url: "https://cdn.discordapp.com/avatars/42/abc.png".to_string(),
            joined_at: Some(Utc.with_ymd_and_hms(2021, 3, 7, 12, 0, 0).unwrap()),
        };
        let json = serde_json::to_string(&member).unwrap();
        let back: TargetMember = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }
}
