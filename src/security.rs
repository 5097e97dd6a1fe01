use crate::discord::Interaction;
use axum::http::HeaderMap;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),
    #[error("malformed signature")]
    MalformedSignature,
    #[error("signature verification failed")]
    InvalidSignature,
    #[error("invalid ed25519 public key")]
    InvalidPublicKey,
    #[error("request body is not a valid interaction: {0}")]
    MalformedBody(String),
}

/// Parse the hex-encoded ed25519 public key shown in the Discord developer portal.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, AuthError> {
    let bytes = hex::decode(hex_key.trim()).map_err(|_| AuthError::InvalidPublicKey)?;
    let bytes: [u8; 32] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| AuthError::InvalidPublicKey)?;
    let key = VerifyingKey::from_bytes(&bytes).map_err(|_| AuthError::InvalidPublicKey)?;
    if key.is_weak() {
        return Err(AuthError::InvalidPublicKey);
    }
    Ok(key)
}

/// Verify that `signature_hex` signs `timestamp ‖ body`.
///
/// Strict verification: small-order keys and `R` points never verify.
pub fn verify_signature(
    key: &VerifyingKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<(), AuthError> {
    let bytes = hex::decode(signature_hex).map_err(|_| AuthError::MalformedSignature)?;
    let signature =
        Signature::from_slice(&bytes).map_err(|_| AuthError::MalformedSignature)?;

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify_strict(&message, &signature)
        .map_err(|_| AuthError::InvalidSignature)
}

/// Authenticate an inbound webhook request and decode its interaction.
///
/// Fails closed: the body is only parsed after the signature checks out, so
/// nothing in an unauthenticated body can influence dispatch.
pub fn verify_request(
    key: &VerifyingKey,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Interaction, AuthError> {
    let signature = header(headers, SIGNATURE_HEADER)?;
    let timestamp = header(headers, TIMESTAMP_HEADER)?;

    verify_signature(key, signature, timestamp, body)?;

    serde_json::from_slice(body).map_err(|e| AuthError::MalformedBody(e.to_string()))
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, AuthError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingHeader(name))
}
