//! Echo commands: /say, /embed

use serenity::async_trait;
use slash_bot_types::commands::{CommandDefinition, EMBED_COMMAND, SAY_COMMAND};
use slash_bot_types::{CommandOutcome, Embed, Reply, SlashInvocation};

use super::CommandHandler;
use crate::session::Session;

/// Fully saturated, full brightness colour with a uniformly random hue.
pub fn random_color() -> u32 {
    hue_to_rgb(rand::random::<f64>())
}

/// HSV → RGB with s = v = 1. `hue` is in `[0, 1)`.
fn hue_to_rgb(hue: f64) -> u32 {
    let h = (hue.rem_euclid(1.0)) * 6.0;
    let sector = h.floor() as u32 % 6;
    let f = h - h.floor();
    let rising = (f * 255.0).round() as u32;
    let falling = ((1.0 - f) * 255.0).round() as u32;

    let (r, g, b) = match sector {
        0 => (255, rising, 0),
        1 => (falling, 255, 0),
        2 => (0, 255, rising),
        3 => (0, falling, 255),
        4 => (rising, 0, 255),
        _ => (255, 0, falling),
    };
    (r << 16) | (g << 8) | b
}

pub struct SayCommand;

#[async_trait]
impl CommandHandler for SayCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &SAY_COMMAND
    }

    async fn handle(&self, _session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        let message = require!(invocation.required_str("message"));
        Reply::text(message).into()
    }
}

pub struct EmbedCommand;

#[async_trait]
impl CommandHandler for EmbedCommand {
    fn definition(&self) -> &'static CommandDefinition {
        &EMBED_COMMAND
    }

    async fn handle(&self, _session: &dyn Session, invocation: &SlashInvocation) -> CommandOutcome {
        let title = require!(invocation.required_str("title"));
        let description = require!(invocation.required_str("description"));

        let embed = Embed::new()
            .title(title)
            .description(description)
            .color(random_color());
        Reply::embed(embed).into()
    }
}
