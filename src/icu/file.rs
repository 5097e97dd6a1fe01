//! Message file validation.
//!
//! A message file is a flat JSON object: `{"greeting": "Hello {name}", ...}`.
//! Entries are checked in document order and validation stops at the first
//! invalid message.

use super::parser::{parse, IcuError};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MessageFileError {
    #[error("file is not valid UTF-8")]
    NotUtf8,
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object mapping message keys to ICU messages")]
    NotAnObject,
    #[error("message \"{key}\" is not a string")]
    NotAString { key: String },
    #[error("message \"{key}\": {source}")]
    Syntax {
        key: String,
        #[source]
        source: IcuError,
    },
}

/// Validate every message in `content`, returning the number of messages.
pub fn validate_messages_file(content: &str) -> Result<usize, MessageFileError> {
    validate_messages_file_with(content, |message| parse(message).map(|_| ()))
}

/// Validate every message in `content` with a caller-supplied checker.
pub fn validate_messages_file_with<F>(content: &str, mut check: F) -> Result<usize, MessageFileError>
where
    F: FnMut(&str) -> Result<(), IcuError>,
{
    let messages: Map<String, Value> = match serde_json::from_str::<Value>(content)? {
        Value::Object(map) => map,
        _ => return Err(MessageFileError::NotAnObject),
    };

    for (key, value) in &messages {
        let message = value
            .as_str()
            .ok_or_else(|| MessageFileError::NotAString { key: key.clone() })?;
        check(message).map_err(|source| MessageFileError::Syntax {
            key: key.clone(),
            source,
        })?;
    }

    Ok(messages.len())
}
