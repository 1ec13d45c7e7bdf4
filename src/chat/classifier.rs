#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;

use serde_json::Value;
use thiserror::Error;

use crate::models::{ServerEvent, Task};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decoding frame: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps a text frame to a server event. Frames of an unknown or missing
/// type are not an error, they classify to `None`. Only the fields the
/// frame's type needs are read, so a stray or mistyped field elsewhere
/// never costs the frame.
pub fn classify(text: &str) -> Result<Option<ServerEvent>, DecodeError> {
    let frame: Value = serde_json::from_str(text)?;

    let Some(kind) = frame.get("type").and_then(Value::as_str) else {
        log::debug!("Ignoring frame without a type");
        return Ok(None);
    };

    let event = match kind {
        "thinking" => ServerEvent::Thinking {
            content: string_field(&frame, "content").unwrap_or_default(),
        },
        "task_update" => ServerEvent::TaskUpdate {
            tasks: tasks_field(&frame),
        },
        "message" => ServerEvent::Message {
            content: string_field(&frame, "content"),
            delta: string_field(&frame, "delta"),
            turn_id: string_field(&frame, "turn_id").filter(|id| !id.is_empty()),
        },
        "message_end" => ServerEvent::MessageEnd,
        "turn_error" => ServerEvent::TurnError {
            reason: string_field(&frame, "content")
                .or_else(|| string_field(&frame, "error"))
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| "the assistant failed to answer".to_string()),
        },
        other => {
            log::debug!("Ignoring frame of unknown type: {}", other);
            return Ok(None);
        }
    };
    Ok(Some(event))
}

fn string_field(frame: &Value, key: &str) -> Option<String> {
    match frame.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            log::debug!("Ignoring non-string `{}` field: {}", key, other);
            None
        }
    }
}

/// Anything but an array reads as an empty task list. Entries that are not
/// objects are skipped.
fn tasks_field(frame: &Value) -> Vec<Task> {
    let Some(Value::Array(items)) = frame.get("tasks") else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<Task>(item.clone()) {
            Ok(task) => Some(task),
            Err(err) => {
                log::debug!("Skipping task entry {}: {}", item, err);
                None
            }
        })
        .collect()
}
