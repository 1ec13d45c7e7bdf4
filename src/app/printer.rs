#[cfg(test)]
#[path = "printer_test.rs"]
mod tests;

use std::io::{self, Write};

use crate::chat::Conversation;
use crate::models::{Message, Task};
use crate::settings::Theme;

const RESET: &str = "\x1b[0m";

/// Line-oriented view of a conversation. Each call to [`Printer::render`]
/// writes only what changed since the previous one: new messages, the
/// unseen tail of the streaming message, and side-channel updates
/// (thinking, tasks) as separate lines.
pub struct Printer<W: Write> {
    out: W,
    theme: Option<Theme>,
    conversation_id: Option<String>,
    started: usize,
    content: String,
    thinking: Option<String>,
    tasks: Vec<Task>,
    needs_prefix: bool,
    line_open: bool,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            theme: None,
            conversation_id: None,
            started: 0,
            content: String::new(),
            thinking: None,
            tasks: vec![],
            needs_prefix: false,
            line_open: false,
        }
    }

    /// Colours the side channel for the given theme. Without a theme the
    /// output is plain text.
    pub fn with_theme(mut self, theme: Option<Theme>) -> Self {
        self.theme = theme;
        self
    }

    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme = theme;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Forgets what was printed; the next render starts from scratch.
    pub fn reset(&mut self) {
        self.conversation_id = None;
        self.started = 0;
        self.content.clear();
        self.thinking = None;
        self.tasks.clear();
        self.needs_prefix = false;
    }

    pub fn render(&mut self, conversation: &Conversation) -> io::Result<()> {
        if self.conversation_id.as_deref() != Some(conversation.id()) {
            self.reset();
            self.conversation_id = Some(conversation.id().to_string());
            self.close_line()?;
            writeln!(self.out, "--- conversation {} ---", conversation.id())?;
        }

        let messages = conversation.messages();
        if messages.len() < self.started {
            // The list never shrinks within one conversation
            log::warn!("Message list shrank, redrawing");
            self.started = 0;
        }

        if let Some(open) = self.started.checked_sub(1).and_then(|i| messages.get(i)) {
            self.update(open)?;
        }
        for message in &messages[self.started..] {
            self.start(message)?;
            self.started += 1;
        }
        self.out.flush()
    }

    /// Writes a status line outside of the message flow.
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        self.close_line()?;
        writeln!(self.out, "* {}", text)?;
        self.out.flush()
    }

    /// Writes a block of plain text outside of the message flow.
    pub fn text(&mut self, text: &str) -> io::Result<()> {
        self.close_line()?;
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }

    /// Writes an input prompt and leaves the line open.
    pub fn prompt(&mut self, label: &str) -> io::Result<()> {
        self.close_line()?;
        write!(self.out, "{}: ", label)?;
        self.out.flush()?;
        self.line_open = false;
        Ok(())
    }

    fn start(&mut self, message: &Message) -> io::Result<()> {
        self.close_line()?;
        self.content.clear();
        self.thinking = None;
        self.tasks.clear();

        self.update_side(message)?;
        self.needs_prefix = true;
        self.update_content(message)
    }

    fn update(&mut self, message: &Message) -> io::Result<()> {
        if self.update_side(message)? {
            self.needs_prefix = true;
        }
        self.update_content(message)
    }

    /// Returns true when anything was written.
    fn update_side(&mut self, message: &Message) -> io::Result<bool> {
        let mut written = false;
        if message.thinking() != self.thinking.as_deref() {
            self.thinking = message.thinking().map(str::to_string);
            if let Some(thinking) = message.thinking() {
                self.side_line(&format!("(thinking) {}", thinking))?;
                written = true;
            }
        }

        if message.tasks() != self.tasks.as_slice() {
            self.tasks = message.tasks().to_vec();
            for task in message.tasks() {
                self.side_line(&format_task(task))?;
                written = true;
            }
        }
        Ok(written)
    }

    fn update_content(&mut self, message: &Message) -> io::Result<()> {
        let content = message.content();
        match content.strip_prefix(self.content.as_str()) {
            Some("") if !self.needs_prefix => {}
            Some(tail) => {
                if self.needs_prefix {
                    self.close_line()?;
                    write!(self.out, "{}> ", message.role())?;
                    self.needs_prefix = false;
                }
                write!(self.out, "{}", tail)?;
                self.line_open = true;
            }
            None => {
                // The text was replaced rather than extended
                self.close_line()?;
                write!(self.out, "{}> (revised) {}", message.role(), content)?;
                self.needs_prefix = false;
                self.line_open = true;
            }
        }
        self.content = content.to_string();
        Ok(())
    }

    fn side_line(&mut self, text: &str) -> io::Result<()> {
        self.close_line()?;
        match self.theme {
            Some(Theme::Dark) => writeln!(self.out, "\x1b[90m  {}{}", text, RESET),
            Some(Theme::Light) => writeln!(self.out, "\x1b[2m  {}{}", text, RESET),
            None => writeln!(self.out, "  {}", text),
        }
    }

    fn close_line(&mut self) -> io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        Ok(())
    }
}

fn format_task(task: &Task) -> String {
    let mark = if task.is_done() { "x" } else { " " };
    let mut line = format!("[{}] {}", mark, task.name);
    if !task.status.is_empty() && !task.is_done() {
        line.push_str(&format!(" ({})", task.status));
    }
    if !task.description.is_empty() {
        line.push_str(&format!(" - {}", task.description));
    }
    line
}
