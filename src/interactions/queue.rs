//! Tracking button clicks: report where a job sits in the queue.

use super::error_response;
use crate::discord::InteractionResponse;
use crate::job::TrackingToken;
use crate::server::AppState;
use tracing::{debug, warn};

pub async fn handle(state: &AppState, token: &TrackingToken) -> InteractionResponse {
    let keys = match state.store.list().await {
        Ok(keys) => keys,
        Err(e) => {
            warn!("Failed to list queued jobs: {}", e);
            return error_response(format!("Queue status could not be retrieved: {}", e));
        }
    };

    let key = token.job_key().to_string();
    let position = queue_position(&keys, &key);

    if position == 0 {
        warn!("Job {} is no longer queued (requested by {})", key, token.user_id());
    } else {
        debug!("Job {} is at {}/{}", key, position, keys.len());
    }

    InteractionResponse::ephemeral(format!("Queued: {}/{}", position, keys.len()))
}

/// 1-based position of `key` in `keys`, or 0 when it is not queued.
pub fn queue_position(keys: &[String], key: &str) -> usize {
    keys.iter().position(|k| k == key).map_or(0, |i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobKey;
    use crate::store::{JobStore, SqliteStore};
    use ed25519_dalek::SigningKey;
    use std::sync::Arc;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    async fn test_state() -> (AppState, Arc<SqliteStore>) {
        let store = Arc::new(SqliteStore::in_memory().await.expect("store"));
        let state = AppState::new(
            "123456789",
            SigningKey::from_bytes(&[7u8; 32]).verifying_key(),
            store.clone(),
            reqwest::Client::new(),
        );
        (state, store)
    }

    fn token(id: &str, lang: &str) -> TrackingToken {
        TrackingToken::new(JobKey::new(id, lang).unwrap(), "9").unwrap()
    }

    #[test]
    fn test_queue_position() {
        let queued = keys(&["1_de.json", "2_fr.json", "3_zh.json"]);

        assert_eq!(queue_position(&queued, "1_de.json"), 1);
        assert_eq!(queue_position(&queued, "2_fr.json"), 2);
        assert_eq!(queue_position(&queued, "3_zh.json"), 3);
        assert_eq!(queue_position(&queued, "4_en.json"), 0);
        assert_eq!(queue_position(&[], "1_de.json"), 0);
    }

    #[tokio::test]
    async fn test_reports_position_and_total() {
        let (state, store) = test_state().await;
        for (id, lang) in [("1", "de"), ("2", "fr"), ("3", "zh")] {
            store.put(&JobKey::new(id, lang).unwrap(), "{}").await.unwrap();
        }

        let response = handle(&state, &token("2", "fr")).await;

        assert!(response.is_ephemeral());
        assert_eq!(response.content(), Some("Queued: 2/3"));
    }

    #[tokio::test]
    async fn test_absent_job_reports_zero() {
        let (state, store) = test_state().await;
        for (id, lang) in [("1", "de"), ("2", "fr"), ("3", "zh")] {
            store.put(&JobKey::new(id, lang).unwrap(), "{}").await.unwrap();
        }

        let response = handle(&state, &token("4", "en")).await;

        assert_eq!(response.content(), Some("Queued: 0/3"));
    }

    #[tokio::test]
    async fn test_list_failure() {
        let (state, store) = test_state().await;
        store.close().await;

        let response = handle(&state, &token("1", "de")).await;

        assert!(response.is_ephemeral());
        let content = response.content().expect("content");
        assert!(content.starts_with("Error: Queue status could not be retrieved: "));
    }
}
