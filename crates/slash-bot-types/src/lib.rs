//! Shared types for the slash-command bot

pub mod commands;
pub mod errors;
pub mod invocation;
pub mod reply;
pub mod types;

pub use commands::{CommandDefinition, OptionDefinition, OptionKind, DEFINITIONS};
pub use invocation::*;
pub use reply::*;
pub use types::*;
