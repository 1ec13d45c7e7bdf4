#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use eyre::{Result, bail};

use crate::router::Route;

pub const HELP: &str = r#"Commands:
    /models             List the available models
    /model <id|none>    Select the model used for new messages
    /theme              Toggle between light and dark
    /locale [code]      Show or change the locale
    /providers [id]     List the predefined providers or show one
    /go <path>          Navigate to a route (/, /chat/<id>, /settings, ...)
    /new                Start a new conversation
    /reconnect          Reopen the socket of the current conversation
    /disconnect         Close the socket
    /password           Change your password
    /logout             End the session
    /help               Show this help
    /quit               Exit
Anything else is sent as a message."#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Models,
    Model(Option<u64>),
    Theme,
    Locale(Option<String>),
    Providers(Option<String>),
    Go(Route),
    New,
    Reconnect,
    Disconnect,
    Password,
    Logout,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines parse to `None`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Some(Command::Say(line.to_string())));
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();
        if parts.next().is_some() {
            bail!("too many arguments for /{}", name);
        }

        let command = match (name, arg) {
            ("models", None) => Command::Models,
            ("model", Some("none")) => Command::Model(None),
            ("model", Some(id)) => match id.parse::<u64>() {
                Ok(id) => Command::Model(Some(id)),
                Err(_) => bail!("invalid model id: {}", id),
            },
            ("theme", None) => Command::Theme,
            ("locale", code) => Command::Locale(code.map(str::to_string)),
            ("providers", id) => Command::Providers(id.map(str::to_string)),
            ("go", Some(path)) => Command::Go(path.parse()?),
            ("new", None) => Command::New,
            ("reconnect", None) => Command::Reconnect,
            ("disconnect", None) => Command::Disconnect,
            ("password", None) => Command::Password,
            ("logout", None) => Command::Logout,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("model" | "go", None) => bail!("/{} needs an argument", name),
            _ => bail!("unknown command: /{} (try /help)", name),
        };
        Ok(Some(command))
    }
}
