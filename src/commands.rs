//! Application command definitions, shared by the interaction handlers and the
//! `register-commands` binary.

use crate::language::Language;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

pub const TRANSLATE_COMMAND: &str = "translate";
pub const LANGUAGE_OPTION: &str = "language";
pub const FILE_OPTION: &str = "file";

// Application command and option types
const CHAT_INPUT: u8 = 1;
const OPTION_STRING: u8 = 3;
const OPTION_ATTACHMENT: u8 = 11;

#[derive(Debug, Clone, Serialize)]
pub struct CommandDefinition {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: u8,
    pub description: &'static str,
    pub options: Vec<OptionDefinition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub kind: u8,
    pub required: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub name: &'static str,
    pub value: &'static str,
}

/// `/translate language:<choice> file:<attachment>`
pub fn translate_command() -> CommandDefinition {
    CommandDefinition {
        name: TRANSLATE_COMMAND,
        kind: CHAT_INPUT,
        description: "Translate the i18n ICU message to the target languages",
        options: vec![
            OptionDefinition {
                name: LANGUAGE_OPTION,
                description: "The target language to translate to",
                kind: OPTION_STRING,
                required: true,
                choices: Language::all()
                    .map(|lang| Choice {
                        name: lang.name(),
                        value: lang.code(),
                    })
                    .collect(),
            },
            OptionDefinition {
                name: FILE_OPTION,
                description: "The file containing the ICU messages to translate",
                kind: OPTION_ATTACHMENT,
                required: true,
                choices: Vec::new(),
            },
        ],
    }
}

/// Every command this application registers.
pub fn all_commands() -> Vec<CommandDefinition> {
    vec![translate_command()]
}

/// Overwrite the application's global commands with [`all_commands`].
///
/// Returns the number of commands Discord reports as registered.
pub async fn register_commands(api_url: &str, application_id: &str, token: &str) -> Result<usize> {
    let client = reqwest::Client::new();
    let url = format!("{}/applications/{}/commands", api_url, application_id);

    info!("Registering commands at {}", url);

    let response = client
        .put(&url)
        .header("Authorization", format!("Bot {}", token))
        .json(&all_commands())
        .send()
        .await
        .context("Failed to send request to Discord API")?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Discord API error ({}): {}", status, body);
    }

    let registered: Vec<Value> = response
        .json()
        .await
        .context("Failed to parse Discord API response")?;

    Ok(registered.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    #[test]
    fn test_translate_command_serialization() {
        let value = serde_json::to_value(translate_command()).expect("serialize");

        assert_eq!(value["name"], "translate");
        assert_eq!(value["type"], 1);
        assert_eq!(value["options"][0]["name"], "language");
        assert_eq!(value["options"][0]["type"], 3);
        assert_eq!(value["options"][0]["required"], true);
        assert_eq!(
            value["options"][0]["choices"],
            json!([
                {"name": "English", "value": "en"},
                {"name": "French", "value": "fr"},
                {"name": "German", "value": "de"},
                {"name": "Chinese", "value": "zh"}
            ])
        );
    }

    #[test]
    fn test_file_option_has_no_choices() {
        let value = serde_json::to_value(translate_command()).expect("serialize");
        let file = &value["options"][1];

        assert_eq!(file["name"], "file");
        assert_eq!(file["type"], 11);
        assert!(file.get("choices").is_none());
    }

    #[test]
    fn test_all_commands() {
        let names: Vec<&str> = all_commands().iter().map(|c| c.name).collect();
        assert_eq!(names, vec![TRANSLATE_COMMAND]);
    }

    // ==================== Registration Tests ====================

    #[tokio::test]
    async fn test_register_commands_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/applications/42/commands"))
            .and(header("Authorization", "Bot test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": "1", "name": "translate"}])),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let registered = register_commands(&mock_server.uri(), "42", "test-token")
            .await
            .expect("registration should succeed");

        assert_eq!(registered, 1);
    }

    #[tokio::test]
    async fn test_register_commands_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/applications/42/commands"))
            .respond_with(ResponseTemplate::new(401).set_body_string("401: Unauthorized"))
            .mount(&mock_server)
            .await;

        let err = register_commands(&mock_server.uri(), "42", "bad-token")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("Unauthorized"));
    }
}
