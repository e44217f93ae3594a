//! Real-time wire types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies one live connection; an account may hold several
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Name of the broadcast room for a task
pub fn room_name(task_id: &str) -> String {
    format!("task_{}", task_id)
}

/// Commands a client sends over an admitted connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientCommand {
    #[serde(rename_all = "camelCase")]
    JoinTask { task_id: String },

    #[serde(rename_all = "camelCase")]
    LeaveTask { task_id: String },

    /// Publish `payload` to everyone currently in the task's room
    #[serde(rename_all = "camelCase")]
    SendMessage {
        task_id: String,
        payload: serde_json::Value,
    },

    Ping,
}

/// Events pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    NewMessage {
        task_id: String,
        sender_id: Uuid,
        payload: serde_json::Value,
        sent_at: DateTime<Utc>,
    },

    #[serde(rename_all = "camelCase")]
    JoinedTask { task_id: String },

    #[serde(rename_all = "camelCase")]
    LeftTask { task_id: String },

    Pong,

    Error { message: String },
}

impl ServerEvent {
    pub fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}
