//! `/translate language:<code> file:<attachment>`
//!
//! Validates the attached ICU message file and queues it under a
//! [`JobKey`]. Every failure short-circuits into an ephemeral error; nothing
//! is retried.

use super::error_response;
use crate::commands::{FILE_OPTION, LANGUAGE_OPTION};
use crate::discord::{ActionRow, Button, CommandData, InteractionResponse, User};
use crate::icu::{validate_messages_file, MessageFileError};
use crate::job::{JobKey, JobKeyError, TrackingToken};
use crate::language::{Language, UnsupportedLanguage};
use crate::server::AppState;
use crate::store::StoreError;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

pub const TRACKING_BUTTON_LABEL: &str = "Queued. You will be notified when done.";

/// Largest attachment body that will be downloaded.
pub const MAX_ATTACHMENT_BYTES: usize = 8 * 1024 * 1024;

/// Display text is the user-visible message that follows `Error: `.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Target language not found.")]
    MissingLanguage,
    #[error("Attachment not found.")]
    MissingAttachment,
    #[error("User not found.")]
    MissingUser,
    #[error(transparent)]
    UnsupportedLanguage(#[from] UnsupportedLanguage),
    #[error("Invalid job identifier: {0}")]
    InvalidIdentifier(#[from] JobKeyError),
    #[error("Attachment could not be fetched: {0}")]
    Fetch(String),
    #[error("ICU Messages file is invalid: {0}")]
    InvalidFile(#[from] MessageFileError),
    #[error("ICU Messages file could not be stored: {0}")]
    Storage(#[from] StoreError),
}

pub async fn handle(
    state: &AppState,
    interaction_id: &str,
    user: Option<&User>,
    data: &CommandData,
) -> InteractionResponse {
    match queue_translation(state, interaction_id, user, data).await {
        Ok(response) => response,
        Err(e) => {
            warn!("Translate command {} failed: {}", interaction_id, e);
            error_response(e)
        }
    }
}

async fn queue_translation(
    state: &AppState,
    interaction_id: &str,
    user: Option<&User>,
    data: &CommandData,
) -> Result<InteractionResponse, CommandError> {
    let language = data
        .string_option(LANGUAGE_OPTION)
        .ok_or(CommandError::MissingLanguage)?;
    let attachment = data
        .attachment(FILE_OPTION)
        .ok_or(CommandError::MissingAttachment)?;
    let user = user.ok_or(CommandError::MissingUser)?;

    let language = Language::from_code(language)?;
    let key = JobKey::new(interaction_id, language.code())?;
    let token = TrackingToken::new(key.clone(), &user.id)?;

    let content = fetch_attachment(&state.http, &attachment.url, MAX_ATTACHMENT_BYTES).await?;
    let messages = validate_messages_file(&content)?;

    state.store.put(&key, &content).await?;

    info!(
        "Queued {} ({} messages, {}) for {}",
        key, messages, attachment.filename, user.id
    );

    let message = format!(
        "ICU Messages file is valid. Ready to translate!\n\n\
         Username: {}\n\
         Filename: {}\n\
         Target Language: {}\n\
         Messages: {}\n\
         Date: {}\n\
         ID: {}",
        user.username,
        attachment.filename,
        language.code(),
        messages,
        Utc::now().format("%Y-%m-%d %H:%M UTC"),
        interaction_id,
    );

    Ok(InteractionResponse::message(message).with_components(vec![ActionRow::new(vec![
        Button::primary(TRACKING_BUTTON_LABEL, token.to_string()),
    ])]))
}

/// Download an attachment body of at most `limit` bytes. The bytes are kept
/// as-is; they only have to be valid UTF-8.
async fn fetch_attachment(
    client: &reqwest::Client,
    url: &str,
    limit: usize,
) -> Result<String, CommandError> {
    let mut response = client
        .get(url)
        .send()
        .await
        .map_err(|e| CommandError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(CommandError::Fetch(format!("HTTP {}", response.status())));
    }

    let too_large = || CommandError::Fetch(format!("attachment is larger than {} bytes", limit));

    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(too_large());
    }

    // Cap the streamed read as well
    let mut bytes = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| CommandError::Fetch(e.to_string()))?
    {
        if bytes.len() + chunk.len() > limit {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }

    String::from_utf8(bytes).map_err(|_| MessageFileError::NotUtf8.into())
}
