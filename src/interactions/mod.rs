//! Interaction dispatch.
//!
//! Every authenticated interaction ends in exactly one of:
//!
//! - `PING` → handshake acknowledgement
//! - `/translate` → [`translate`]: validate the attached file and queue it
//! - a tracking button click → [`queue`]: report the job's queue position
//! - anything else → [`Reply::UnknownInteraction`] (HTTP 400)

pub mod queue;
pub mod translate;

use crate::commands::TRANSLATE_COMMAND;
use crate::discord::{Interaction, InteractionKind, InteractionResponse};
use crate::job::TrackingToken;
use crate::server::AppState;
use std::fmt::Display;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Respond(InteractionResponse),
    UnknownInteraction,
}

pub async fn dispatch(state: &AppState, interaction: Interaction) -> Reply {
    match &interaction.kind {
        InteractionKind::Ping => {
            debug!("Acknowledging handshake {}", interaction.id);
            Reply::Respond(InteractionResponse::pong())
        }
        InteractionKind::ApplicationCommand(data) => {
            match data.name.to_lowercase().as_str() {
                TRANSLATE_COMMAND => Reply::Respond(
                    translate::handle(state, &interaction.id, interaction.user.as_ref(), data)
                        .await,
                ),
                other => {
                    warn!("Unknown command '{}' in interaction {}", other, interaction.id);
                    Reply::UnknownInteraction
                }
            }
        }
        InteractionKind::MessageComponent(data) => match TrackingToken::parse(&data.custom_id) {
            Ok(token) => Reply::Respond(queue::handle(state, &token).await),
            Err(e) => {
                error!("Unknown component in interaction {}: {}", interaction.id, e);
                Reply::UnknownInteraction
            }
        },
        InteractionKind::Unsupported(kind) => {
            error!("Unknown interaction type {} ({})", kind, interaction.id);
            Reply::UnknownInteraction
        }
    }
}

/// The single user-facing error shape: an ephemeral `Error: <message>`.
pub fn error_response(message: impl Display) -> InteractionResponse {
    InteractionResponse::ephemeral(format!("Error: {}", message))
}
