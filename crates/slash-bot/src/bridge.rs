//! Bridge between serenity and the bot's own types
//!
//! Inbound: serenity interactions become [`SlashInvocation`]s.
//! Outbound: [`Reply`]s and [`CommandDefinition`]s become serenity builders.

#[path = "bridge_tests.rs"]
mod bridge_tests;

use chrono::{DateTime, Utc};
use serenity::builder::{
    CreateCommand, CreateCommandOption, CreateEmbed, CreateInteractionResponse,
    CreateInteractionResponseMessage,
};
use serenity::model::application::{CommandInteraction, CommandOptionType, ResolvedValue};
use serenity::model::permissions::Permissions;
use serenity::model::user::User as SerenityUser;
use serenity::model::Timestamp;
use slash_bot_types::{
    CommandDefinition, CommandOption, CommandOptionValue, DiscordUser, Embed, InvokerPermissions,
    OptionKind, Reply, ReplyBody, SlashInvocation, TargetMember,
};
use tracing::debug;

// ── Inbound ────────────────────────────────────────────────────────────────

pub fn convert_user(user: &SerenityUser) -> DiscordUser {
    DiscordUser {
        id: user.id.get(),
        username: user.name.clone(),
        global_name: user.global_name.as_deref().map(String::from),
        bot: user.bot,
    }
}

pub fn convert_timestamp(ts: Timestamp) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.unix_timestamp(), 0)
}

/// Build the target of a `User` option. `nick` and `joined_at` come from the
/// partial member Discord resolves alongside the user, when there is one.
pub fn target_member(
    user: &SerenityUser,
    nick: Option<&str>,
    joined_at: Option<Timestamp>,
) -> TargetMember {
    TargetMember {
        user: convert_user(user),
        nick: nick.map(String::from),
        // The resolved partial member carries no guild avatar, so the global one is shown
        avatar_url: user.face(),
        joined_at: joined_at.and_then(convert_timestamp),
    }
}

/// Authority flags from the permissions Discord computed for the invoker.
/// No permissions (DM, or member missing) means no authority.
pub fn invoker_permissions(permissions: Option<Permissions>) -> InvokerPermissions {
    let Some(p) = permissions else {
        return InvokerPermissions::default();
    };
    InvokerPermissions {
        administrator: p.contains(Permissions::ADMINISTRATOR),
        kick_members: p.contains(Permissions::KICK_MEMBERS),
        ban_members: p.contains(Permissions::BAN_MEMBERS),
    }
}

pub fn convert_invocation(interaction: &CommandInteraction) -> SlashInvocation {
    let options = interaction
        .data
        .options()
        .into_iter()
        .filter_map(|opt| {
            let value = match opt.value {
                ResolvedValue::String(s) => CommandOptionValue::String(s.to_string()),
                ResolvedValue::User(user, member) => {
                    CommandOptionValue::User(Box::new(target_member(
                        user,
                        member.and_then(|m| m.nick.as_deref()),
                        member.and_then(|m| m.joined_at),
                    )))
                }
                _ => {
                    debug!(
                        "Ignoring option '{}' of unsupported type on /{}",
                        opt.name, interaction.data.name
                    );
                    return None;
                }
            };
            Some(CommandOption {
                name: opt.name.to_string(),
                value,
            })
        })
        .collect();

    SlashInvocation {
        interaction_id: interaction.id.get(),
        command_name: interaction.data.name.clone(),
        guild_id: interaction.guild_id.map(|g| g.get()),
        channel_id: interaction.channel_id.get(),
        user: convert_user(&interaction.user),
        permissions: invoker_permissions(interaction.member.as_ref().and_then(|m| m.permissions)),
        options,
    }
}

// ── Outbound ───────────────────────────────────────────────────────────────

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::User => CommandOptionType::User,
        OptionKind::String => CommandOptionType::String,
    }
}

pub fn create_command(definition: &CommandDefinition) -> CreateCommand {
    definition.options.iter().fold(
        CreateCommand::new(definition.name).description(definition.description),
        |cmd, opt| {
            cmd.add_option(
                CreateCommandOption::new(option_type(opt.kind), opt.name, opt.description)
                    .required(opt.required),
            )
        },
    )
}

pub fn create_embed(embed: &Embed) -> CreateEmbed {
    let mut builder = CreateEmbed::new();
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(description) = &embed.description {
        builder = builder.description(description);
    }
    if let Some(color) = embed.color {
        builder = builder.colour(color);
    }
    for field in &embed.fields {
        builder = builder.field(&field.name, &field.value, field.inline);
    }
    // Discord rejects an embed whose thumbnail URL is empty
    if let Some(thumbnail) = embed.thumbnail.as_ref().filter(|t| !t.url.is_empty()) {
        builder = builder.thumbnail(&thumbnail.url);
    }
    builder
}

pub fn create_response(reply: &Reply) -> CreateInteractionResponse {
    let message = CreateInteractionResponseMessage::new().ephemeral(reply.is_ephemeral());
    let message = match &reply.body {
        ReplyBody::Text(content) => message.content(content),
        ReplyBody::Embed(embed) => message.embed(create_embed(embed)),
    };
    CreateInteractionResponse::Message(message)
}
