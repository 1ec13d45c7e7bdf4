#[cfg(test)]
#[path = "reducer_test.rs"]
mod tests;

use crate::models::{Message, ServerEvent, Task};

/// Per-turn accumulators. They are reset by every new user message and
/// copied onto the assistant message the turn opens.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamState {
    pub is_thinking: bool,
    pub current_thinking: String,
    pub current_tasks: Vec<Task>,
}

/// The message list of one conversation plus the state of the turn that is
/// currently streaming into it.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    id: String,
    messages: Vec<Message>,
    stream: StreamState,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn stream(&self) -> &StreamState {
        &self.stream
    }

    pub fn is_thinking(&self) -> bool {
        self.stream.is_thinking
    }

    /// Appends the user message and starts a fresh turn, whether or not the
    /// previous one ever ended.
    pub fn begin_turn(&mut self, content: impl Into<String>) {
        self.messages.push(Message::new_user(content));
        self.stream = StreamState {
            is_thinking: true,
            ..Default::default()
        };
    }

    /// Stops waiting for the assistant without touching the message list.
    pub fn end_turn(&mut self) {
        self.stream.is_thinking = false;
    }

    /// Closes an in-flight turn with a system message. Returns false when
    /// there was nothing to abort.
    pub fn abort_turn(&mut self, reason: &str) -> bool {
        if !self.stream.is_thinking {
            return false;
        }
        self.interrupt(reason);
        true
    }

    pub fn apply(&mut self, event: ServerEvent) {
        match event {
            ServerEvent::Thinking { content } => self.on_thinking(content),
            ServerEvent::TaskUpdate { tasks } => self.on_task_update(tasks),
            ServerEvent::Message {
                content,
                delta,
                turn_id,
            } => {
                let content = content.unwrap_or_default();
                let delta = delta.unwrap_or_default();
                match turn_id {
                    Some(turn_id) => self.on_turn_message(&turn_id, content, delta),
                    None => self.on_message(content, delta),
                }
            }
            ServerEvent::MessageEnd => self.end_turn(),
            ServerEvent::TurnError { reason } => self.interrupt(&reason),
        }
    }

    fn on_thinking(&mut self, content: String) {
        if self.stream.is_thinking {
            if let Some(last) = self.open_assistant_mut() {
                last.set_thinking(content.as_str());
            }
        }
        self.stream.current_thinking = content;
    }

    fn on_task_update(&mut self, tasks: Vec<Task>) {
        if let Some(last) = self.open_assistant_mut() {
            last.set_tasks(tasks.clone());
        }
        self.stream.current_tasks = tasks;
    }

    fn on_message(&mut self, content: String, delta: String) {
        let continues = content.is_empty() && self.open_assistant_mut().is_some();
        if continues {
            self.continue_message(delta);
        } else {
            self.open_message(content, delta, None);
        }
    }

    fn on_turn_message(&mut self, turn_id: &str, content: String, delta: String) {
        let continues = self
            .open_assistant_mut()
            .is_some_and(|last| last.id() == Some(turn_id));
        if !continues {
            self.open_message(content, delta, Some(turn_id));
        } else if !content.is_empty() {
            self.replace_message(content);
        } else {
            self.continue_message(delta);
        }
    }

    fn continue_message(&mut self, delta: String) {
        let tasks = self.stream.current_tasks.clone();
        if let Some(last) = self.open_assistant_mut() {
            last.append(&delta);
            if !tasks.is_empty() {
                last.set_tasks(tasks);
            }
        }
    }

    fn replace_message(&mut self, content: String) {
        let tasks = self.stream.current_tasks.clone();
        if let Some(last) = self.open_assistant_mut() {
            last.set_content(content);
            if !tasks.is_empty() {
                last.set_tasks(tasks);
            }
        }
    }

    fn open_message(&mut self, content: String, delta: String, turn_id: Option<&str>) {
        let text = if delta.is_empty() { content } else { delta };
        let mut message = Message::new_assistant(text)
            .with_thinking(self.stream.current_thinking.as_str())
            .with_tasks(self.stream.current_tasks.clone());
        if let Some(turn_id) = turn_id {
            message = message.with_id(turn_id);
        }
        self.messages.push(message);
    }

    fn interrupt(&mut self, reason: &str) {
        log::warn!("Turn in conversation {} interrupted: {}", self.id, reason);
        self.stream.is_thinking = false;
        self.messages
            .push(Message::new_system(format!("Turn interrupted: {}", reason)));
    }

    fn open_assistant_mut(&mut self) -> Option<&mut Message> {
        self.messages.last_mut().filter(|m| m.is_assistant())
    }
}
