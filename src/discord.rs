//! Discord interaction wire types.
//!
//! Inbound payloads are decoded into [`Interaction`], whose [`InteractionKind`]
//! is a closed enum: any interaction type this service does not handle lands in
//! [`InteractionKind::Unsupported`] so dispatch has to deal with it explicitly.
//!
//! Reference: https://discord.com/developers/docs/interactions/receiving-and-responding

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// Interaction types
pub const INTERACTION_PING: u8 = 1;
pub const INTERACTION_APPLICATION_COMMAND: u8 = 2;
pub const INTERACTION_MESSAGE_COMPONENT: u8 = 3;

// Interaction response types
pub const RESPONSE_PONG: u8 = 1;
pub const RESPONSE_CHANNEL_MESSAGE: u8 = 4;

/// Message flag making a response visible only to the invoking user.
pub const FLAG_EPHEMERAL: u64 = 1 << 6;

// Component types and styles
const COMPONENT_ACTION_ROW: u8 = 1;
const COMPONENT_BUTTON: u8 = 2;
const BUTTON_STYLE_PRIMARY: u8 = 1;

// ==================== Inbound ====================

#[derive(Debug, Deserialize)]
pub struct RawInteraction {
    id: String,
    #[serde(rename = "type")]
    kind: u8,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    member: Option<Member>,
    #[serde(default)]
    user: Option<User>,
}

/// An authenticated interaction, decoded from the webhook body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawInteraction")]
pub struct Interaction {
    pub id: String,
    pub kind: InteractionKind,
    /// Invoking user: `member.user` in guilds, `user` in DMs.
    pub user: Option<User>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionKind {
    Ping,
    ApplicationCommand(CommandData),
    MessageComponent(ComponentData),
    /// Any interaction type this service does not handle (autocomplete, modals, ...)
    Unsupported(u8),
}

impl TryFrom<RawInteraction> for Interaction {
    type Error = String;

    fn try_from(raw: RawInteraction) -> Result<Self, Self::Error> {
        let kind = match raw.kind {
            INTERACTION_PING => InteractionKind::Ping,
            INTERACTION_APPLICATION_COMMAND => {
                let data = raw.data.ok_or("application command without data")?;
                let data = serde_json::from_value(data)
                    .map_err(|e| format!("invalid application command data: {}", e))?;
                InteractionKind::ApplicationCommand(data)
            }
            INTERACTION_MESSAGE_COMPONENT => {
                let data = raw.data.ok_or("message component without data")?;
                let data = serde_json::from_value(data)
                    .map_err(|e| format!("invalid message component data: {}", e))?;
                InteractionKind::MessageComponent(data)
            }
            other => InteractionKind::Unsupported(other),
        };

        let user = raw.member.and_then(|m| m.user).or(raw.user);

        Ok(Interaction {
            id: raw.id,
            kind,
            user,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Member {
    #[serde(default)]
    user: Option<User>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandData {
    pub name: String,
    #[serde(default)]
    pub options: Vec<CommandOption>,
    #[serde(default)]
    pub resolved: Option<Resolved>,
}

impl CommandData {
    /// Look up a string option by name. Empty strings count as absent.
    pub fn string_option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .and_then(|o| o.value.as_ref())
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Resolve the attachment referenced by option `name`, falling back to the
    /// first resolved attachment.
    pub fn attachment(&self, name: &str) -> Option<&Attachment> {
        let attachments = &self.resolved.as_ref()?.attachments;
        self.string_option(name)
            .and_then(|id| attachments.get(id))
            .or_else(|| attachments.values().next())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommandOption {
    pub name: String,
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Resolved {
    #[serde(default)]
    pub attachments: BTreeMap<String, Attachment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attachment {
    pub filename: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentData {
    pub custom_id: String,
}

// ==================== Outbound ====================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InteractionResponse {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<MessageData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageData {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ActionRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRow {
    #[serde(rename = "type")]
    kind: u8,
    pub components: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: u8,
    pub style: u8,
    pub label: String,
    pub custom_id: String,
}

impl InteractionResponse {
    /// Handshake acknowledgement for `PING` interactions.
    pub fn pong() -> Self {
        Self {
            kind: RESPONSE_PONG,
            data: None,
        }
    }

    /// Channel message visible to everyone.
    pub fn message(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(MessageData {
                content: content.into(),
                flags: None,
                components: Vec::new(),
            }),
        }
    }

    /// Channel message visible only to the invoking user.
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            kind: RESPONSE_CHANNEL_MESSAGE,
            data: Some(MessageData {
                content: content.into(),
                flags: Some(FLAG_EPHEMERAL),
                components: Vec::new(),
            }),
        }
    }

    pub fn with_components(mut self, rows: Vec<ActionRow>) -> Self {
        if let Some(data) = self.data.as_mut() {
            data.components = rows;
        }
        self
    }

    // Inspection helpers for tests and callers of the library API

    pub fn content(&self) -> Option<&str> {
        self.data.as_ref().map(|d| d.content.as_str())
    }

    pub fn is_ephemeral(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|d| d.flags)
            .is_some_and(|f| f & FLAG_EPHEMERAL != 0)
    }
}

impl ActionRow {
    pub fn new(components: Vec<Button>) -> Self {
        Self {
            kind: COMPONENT_ACTION_ROW,
            components,
        }
    }
}

impl Button {
    pub fn primary(label: impl Into<String>, custom_id: impl Into<String>) -> Self {
        Self {
            kind: COMPONENT_BUTTON,
            style: BUTTON_STYLE_PRIMARY,
            label: label.into(),
            custom_id: custom_id.into(),
        }
    }
}
