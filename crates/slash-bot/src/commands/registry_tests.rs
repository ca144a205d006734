//! Dispatch-level tests: every interaction yields exactly one reply.

#[cfg(test)]
pub(crate) mod fixtures {
    use slash_bot_types::{
        CommandOption, CommandOptionValue, DiscordUser, InvokerPermissions, SlashInvocation,
        TargetMember,
    };

    /// Invocation by user 1 in guild 200, channel 100, with no permissions
    pub fn invocation(command_name: &str, options: Vec<CommandOption>) -> SlashInvocation {
        SlashInvocation {
            interaction_id: 9999,
            command_name: command_name.to_string(),
            guild_id: Some(200),
            channel_id: 100,
            user: DiscordUser {
                id: 1,
                username: "alice".to_string(),
                global_name: None,
                bot: false,
            },
            permissions: InvokerPermissions::default(),
            options,
        }
    }

    /// User 2 ("bob"), not a guild member
    pub fn target_user() -> TargetMember {
        TargetMember {
            user: DiscordUser {
                id: 2,
                username: "bob".to_string(),
                global_name: None,
                bot: false,
            },
            nick: None,
            avatar_url: "https://cdn.discordapp.com/avatars/2/abc.png".to_string(),
            joined_at: None,
        }
    }

    pub fn target_option(member: TargetMember) -> CommandOption {
        CommandOption {
            name: "user".to_string(),
            value: CommandOptionValue::User(Box::new(member)),
        }
    }

    pub fn string_option(name: &str, value: &str) -> CommandOption {
        CommandOption {
            name: name.to_string(),
            value: CommandOptionValue::String(value.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::commands::CommandRegistry;
    use crate::session::MockSession;
    use slash_bot_types::commands::DEFINITIONS;
    use slash_bot_types::{InvokerPermissions, ReplyBody};
    use std::time::Duration;

    #[test]
    fn test_standard_registry_covers_every_definition() {
        let registry = CommandRegistry::standard();
        assert_eq!(registry.len(), DEFINITIONS.len());
        for def in DEFINITIONS {
            let handler = registry.get(def.name).expect("handler registered");
            assert_eq!(handler.definition(), def);
        }
    }

    #[test]
    fn test_definitions_follow_declaration_order() {
        let registry = CommandRegistry::standard();
        let names: Vec<_> = registry.definitions().iter().map(|d| d.name).collect();
        let declared: Vec<_> = DEFINITIONS.iter().map(|d| d.name).collect();
        assert_eq!(names, declared);
    }

    #[test]
    fn test_names_sorted() {
        let registry = CommandRegistry::standard();
        assert_eq!(
            registry.names(),
            vec!["ban", "embed", "hello", "kick", "ping", "say", "serverinfo", "userinfo"]
        );
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("ping").is_none());
    }

    #[test]
    fn test_default_registry_is_empty() {
        assert!(CommandRegistry::default().is_empty());
        assert_eq!(CommandRegistry::default().len(), CommandRegistry::new().len());
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = CommandRegistry::new();
        registry.register(crate::commands::PingCommand);
        registry.register(crate::commands::PingCommand);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_name() {
        let registry = CommandRegistry::standard();
        let session = MockSession::new().with_latency(Duration::from_millis(50));

        let reply = registry
            .dispatch(&session, &invocation("ping", vec![]))
            .await;
        assert_eq!(reply.as_text(), Some("Pong! Latency: 50ms"));

        let reply = registry
            .dispatch(&session, &invocation("say", vec![string_option("message", "hi")]))
            .await;
        assert_eq!(reply.as_text(), Some("hi"));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_command_still_replies() {
        let registry = CommandRegistry::standard();
        let reply = registry
            .dispatch(&MockSession::new(), &invocation("dance", vec![]))
            .await;
        assert!(reply.is_ephemeral());
        assert_eq!(reply.as_text(), Some("Unknown command: dance"));
    }

    #[tokio::test]
    async fn test_dispatch_denial_is_ephemeral_and_side_effect_free() {
        let registry = CommandRegistry::standard();
        let session = MockSession::new();
        for name in ["kick", "ban"] {
            let inv = invocation(name, vec![target_option(target_user())]);
            let reply = registry.dispatch(&session, &inv).await;
            assert!(reply.is_ephemeral(), "{} denial must be ephemeral", name);
            assert!(reply.as_text().unwrap().contains("don't have permission"));
        }
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_moderation_failure_yields_public_reply() {
        let registry = CommandRegistry::standard();
        let session = MockSession::new().rejecting("Missing Permissions");
        let mut inv = invocation("ban", vec![target_option(target_user())]);
        inv.permissions = InvokerPermissions {
            ban_members: true,
            ..Default::default()
        };

        let reply = registry.dispatch(&session, &inv).await;
        assert!(!reply.is_ephemeral());
        assert_eq!(reply.as_text(), Some("Failed to ban: Missing Permissions"));
    }

    #[tokio::test]
    async fn test_every_command_replies_with_no_options() {
        // Worst case input: no options, no permissions. Each command must
        // still produce a reply rather than panic.
        let registry = CommandRegistry::standard();
        let session = MockSession::new();
        for def in DEFINITIONS {
            let reply = registry
                .dispatch(&session, &invocation(def.name, vec![]))
                .await;
            match &reply.body {
                ReplyBody::Text(text) => assert!(!text.is_empty(), "{}", def.name),
                ReplyBody::Embed(_) => {}
            }
        }
        assert!(session.calls().is_empty());
    }
}
