#[cfg(test)]
#[path = "app_test.rs"]
mod tests;

use std::io::Write;
use std::time::{Duration, Instant};

use eyre::{Context, Result, bail};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use uuid::Uuid;

use crate::models::{predefined_providers, provider_by_id};
use crate::router::Route;
use crate::settings::{SUPPORTED_LOCALES, detect_system_dark};

use super::command::{Command, HELP};
use super::context::AppContext;
use super::printer::Printer;

const WATCHDOG_TICK: Duration = Duration::from_secs(1);

/// A question the next input line answers instead of being read as a
/// message or command.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Prompt {
    Username,
    Password { username: String },
    OldPassword,
    NewPassword { old: String },
    ConfirmPassword { old: String, new: String },
}

/// The interactive loop: input lines, socket events and the turn watchdog
/// all funnel through here, so the chat store has a single owner.
pub struct App<W: Write> {
    ctx: AppContext,
    printer: Printer<W>,
    route: Route,
    requested: Option<Route>,
    prompt: Option<Prompt>,
}

impl<W: Write> App<W> {
    pub fn new(ctx: AppContext, out: W) -> Self {
        let theme = ctx.theme().theme();
        Self {
            ctx,
            printer: Printer::new(out).with_theme(Some(theme)),
            route: Route::Home,
            requested: None,
            prompt: None,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub fn into_output(self) -> W {
        self.printer.into_inner()
    }

    pub async fn run<R>(&mut self, initial: Route, input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        let mut watchdog = tokio::time::interval(WATCHDOG_TICK);

        if let Err(err) = self.navigate(initial).await {
            self.report(&err)?;
        }

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.wrap_err("reading input")? else {
                        break;
                    };
                    match self.handle_line(&line).await {
                        Ok(true) => break,
                        Ok(false) => {}
                        Err(err) => self.report(&err)?,
                    }
                }

                Some(event) = self.ctx.next_event() => {
                    if self.ctx.chat_mut().handle_event(event) {
                        self.render()?;
                    }
                }

                _ = watchdog.tick() => {
                    if self.ctx.chat_mut().check_watchdog(Instant::now()) {
                        self.render()?;
                    }
                }
            }
        }

        self.ctx.chat_mut().disconnect();
        Ok(())
    }

    /// Returns true when the application should exit.
    async fn handle_line(&mut self, line: &str) -> Result<bool> {
        if let Some(prompt) = self.prompt.take() {
            if line.trim() == "/quit" {
                return Ok(true);
            }
            self.answer(prompt, line).await?;
            return Ok(false);
        }

        match Command::parse(line)? {
            Some(command) => self.execute(command).await,
            None => Ok(false),
        }
    }

    async fn navigate(&mut self, to: Route) -> Result<()> {
        let landed = self.ctx.navigate(to.clone()).await?;
        if landed != to {
            log::info!("Route {} redirected to {}", to, landed);
        }

        match &landed {
            Route::Login => {
                if to != Route::Login {
                    self.requested = Some(to);
                }
                self.route = Route::Login;
                self.ask(Prompt::Username)?;
            }
            Route::ResetPassword => {
                if to != Route::ResetPassword {
                    self.requested = Some(to);
                    self.printer
                        .notice("You must change your password before continuing")?;
                }
                self.route = Route::ResetPassword;
                self.ask(Prompt::OldPassword)?;
            }
            Route::Home => {
                let id = Uuid::new_v4().to_string();
                self.open(&id)?;
            }
            Route::Chat(id) => {
                let id = id.clone();
                self.open(&id)?;
            }
            Route::Settings => {
                self.route = Route::Settings;
                self.show_settings()?;
            }
        }
        Ok(())
    }

    fn open(&mut self, conversation_id: &str) -> Result<()> {
        self.ctx.open_conversation(conversation_id)?;
        self.route = Route::Chat(conversation_id.to_string());
        self.render()
    }

    async fn answer(&mut self, prompt: Prompt, line: &str) -> Result<()> {
        match prompt {
            Prompt::Username => {
                let username = line.trim();
                if username.is_empty() {
                    return self.ask(Prompt::Username);
                }
                self.ask(Prompt::Password {
                    username: username.to_string(),
                })
            }
            Prompt::Password { username } => match self.ctx.login(&username, line).await {
                Ok(res) => {
                    self.printer
                        .notice(&format!("Logged in as {}", res.user.username))?;
                    let to = self.requested.take().unwrap_or(Route::Home);
                    self.navigate(to).await
                }
                Err(err) => {
                    self.report(&err)?;
                    self.ask(Prompt::Username)
                }
            },
            Prompt::OldPassword => self.ask(Prompt::NewPassword {
                old: line.to_string(),
            }),
            Prompt::NewPassword { old } => self.ask(Prompt::ConfirmPassword {
                old,
                new: line.to_string(),
            }),
            Prompt::ConfirmPassword { old, new } => {
                match self.ctx.reset_password(&old, &new, line).await {
                    Ok(res) => {
                        let message = if res.message.is_empty() {
                            "Password changed"
                        } else {
                            res.message.as_str()
                        };
                        self.printer.notice(message)?;
                        let to = self.requested.take().unwrap_or(Route::Home);
                        self.navigate(to).await
                    }
                    Err(err) => {
                        self.report(&err)?;
                        self.ask(Prompt::OldPassword)
                    }
                }
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Say(text) => {
                if self.route.conversation_id().is_none() {
                    bail!("open a conversation first (/new or /go /chat/<id>)");
                }
                let sent = self.ctx.chat_mut().send_message(&text);
                self.render()?;
                sent?;
            }
            Command::Models => self.show_models()?,
            Command::Model(model_id) => {
                if let Some(id) = model_id {
                    if !self.ctx.chat().models().iter().any(|m| m.id == id) {
                        bail!("unknown model id: {} (see /models)", id);
                    }
                }
                self.ctx.chat_mut().set_current_model(model_id);
                let name = self
                    .ctx
                    .chat()
                    .current_model()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "backend default".to_string());
                self.printer.notice(&format!("Model: {}", name))?;
            }
            Command::Theme => {
                let theme = self.ctx.theme_mut().toggle().await?;
                self.printer.set_theme(Some(theme));
                self.printer.notice(&format!("Theme: {}", theme))?;
            }
            Command::Locale(None) => {
                let text = format!(
                    "Locale: {} (available: {})",
                    self.ctx.locale(),
                    SUPPORTED_LOCALES.join(", ")
                );
                self.printer.notice(&text)?;
            }
            Command::Locale(Some(code)) => {
                self.ctx.set_locale(&code).await?;
                self.printer.notice(&format!("Locale: {}", code))?;
            }
            Command::Providers(Some(id)) => {
                let Some(provider) = provider_by_id(&id) else {
                    bail!("unknown provider: {} (see /providers)", id);
                };
                let text = format!(
                    "{} ({})\nType:    {}\nURL:     {}\n{}",
                    provider.name,
                    provider.id,
                    provider.kind.as_str(),
                    if provider.base_url.is_empty() { "-" } else { provider.base_url },
                    provider.description
                );
                self.printer.text(&text)?;
            }
            Command::Providers(None) => {
                for provider in predefined_providers() {
                    self.printer.text(&format!(
                        "{:<20} {:<24} {:<16} {}",
                        provider.id,
                        provider.name,
                        provider.kind.as_str(),
                        provider.base_url
                    ))?;
                }
            }
            Command::Go(route) => self.navigate(route).await?,
            Command::New => {
                let id = Uuid::new_v4().to_string();
                self.navigate(Route::Chat(id)).await?;
            }
            Command::Reconnect => {
                let Some(id) = self.route.conversation_id().map(str::to_string) else {
                    bail!("no conversation to reconnect");
                };
                self.ctx.chat_mut().connect(&id)?;
                self.printer.notice(&format!("Reconnecting to {}", id))?;
            }
            Command::Disconnect => {
                self.ctx.chat_mut().disconnect();
                self.render()?;
                self.printer.notice("Disconnected")?;
            }
            Command::Password => self.navigate(Route::ResetPassword).await?,
            Command::Logout => {
                self.ctx.logout().await?;
                self.printer.reset();
                self.printer.notice("Logged out")?;
                self.navigate(Route::Login).await?;
            }
            Command::Help => self.printer.text(HELP)?,
            Command::Quit => return Ok(true),
        }
        Ok(false)
    }

    fn show_models(&mut self) -> Result<()> {
        let current = self.ctx.chat().current_model_id();
        let lines: Vec<String> = self
            .ctx
            .chat()
            .models()
            .iter()
            .map(|m| {
                let mark = if Some(m.id) == current { "*" } else { " " };
                let state = if m.is_enabled() { "" } else { " (disabled)" };
                format!("{} {:>4}  {}{}", mark, m.id, m, state)
            })
            .collect();

        if lines.is_empty() {
            self.printer.notice("No models available")?;
        }
        for line in lines {
            self.printer.text(&line)?;
        }
        Ok(())
    }

    fn show_settings(&mut self) -> Result<()> {
        if self.ctx.theme_mut().set_system_dark(detect_system_dark()) {
            let theme = self.ctx.theme().theme();
            self.printer.set_theme(Some(theme));
        }

        let session = self.ctx.session();
        let user = session
            .current_user()
            .map(|u| u.username.clone())
            .unwrap_or_default();
        let text = format!(
            "User:    {}{}\nTheme:   {} ({:?})\nLocale:  {}\nAPI:     {}\nSocket:  {} ({:?})",
            user,
            if session.is_admin() { " (admin)" } else { "" },
            self.ctx.theme().theme(),
            self.ctx.theme().preference(),
            self.ctx.locale(),
            self.ctx.config().api.base_url,
            self.ctx.config().api.ws_url,
            self.ctx.chat().ready_state(),
        );
        self.printer.text(&text)?;
        Ok(())
    }

    fn ask(&mut self, prompt: Prompt) -> Result<()> {
        let label = match &prompt {
            Prompt::Username => "username",
            Prompt::Password { .. } => "password",
            Prompt::OldPassword => "current password",
            Prompt::NewPassword { .. } => "new password",
            Prompt::ConfirmPassword { .. } => "confirm new password",
        };
        self.printer.prompt(label)?;
        self.prompt = Some(prompt);
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        if self.route.conversation_id().is_some() {
            self.printer.render(self.ctx.chat().conversation())?;
        }
        Ok(())
    }

    fn report(&mut self, err: &eyre::Report) -> Result<()> {
        log::error!("{:#}", err);
        self.printer.notice(&format!("error: {:#}", err))?;
        Ok(())
    }
}
