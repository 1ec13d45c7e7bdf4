use serde::{Deserialize, Serialize};

use super::Task;

/// Frames written to the chat socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientFrame {
    UserMessage {
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model_id: Option<u64>,
    },
}

/// The closed set of server events the reducer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerEvent {
    /// Cumulative thinking trace for the current turn.
    Thinking { content: String },
    /// Full replacement of the current task list.
    TaskUpdate { tasks: Vec<Task> },
    /// A content chunk. `delta` continues an open message, a non-empty
    /// `content` starts a new one unless `turn_id` names the open turn.
    Message {
        content: Option<String>,
        delta: Option<String>,
        turn_id: Option<String>,
    },
    MessageEnd,
    /// The backend gave up on the turn.
    TurnError { reason: String },
}

impl ClientFrame {
    pub fn user_message(content: impl Into<String>, model_id: Option<u64>) -> Self {
        ClientFrame::UserMessage {
            content: content.into(),
            model_id,
        }
    }
}

impl ServerEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerEvent::Thinking { .. } => "thinking",
            ServerEvent::TaskUpdate { .. } => "task_update",
            ServerEvent::Message { .. } => "message",
            ServerEvent::MessageEnd => "message_end",
            ServerEvent::TurnError { .. } => "turn_error",
        }
    }

    pub fn delta(delta: impl Into<String>) -> Self {
        ServerEvent::Message {
            content: None,
            delta: Some(delta.into()),
            turn_id: None,
        }
    }
}
