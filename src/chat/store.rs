#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::sync::Arc;
use std::time::{Duration, Instant};

use eyre::{Context, Result, bail};
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::models::{ArcEventTx, ClientFrame, Event, Model};
use crate::transport::{BoxTransport, ReadyState, chat_url};

use super::classifier::classify;
use super::reducer::Conversation;

/// Binds the socket, the classifier and the reducer for the active
/// conversation, and owns the model list. Only the application loop
/// mutates it; everything asynchronous comes back as an [`Event`].
pub struct ChatStore {
    api: ApiClient,
    transport: BoxTransport,
    event_tx: ArcEventTx,
    ws_base: String,
    token: Option<String>,

    conversation: Conversation,
    socket_generation: u64,
    epoch: u64,
    cancel: CancellationToken,

    models: Vec<Model>,
    current_model_id: Option<u64>,

    turn_timeout: Option<Duration>,
    last_activity: Option<Instant>,
}

impl ChatStore {
    pub fn new(
        api: ApiClient,
        transport: BoxTransport,
        event_tx: ArcEventTx,
        ws_base: impl Into<String>,
    ) -> Self {
        Self {
            api,
            transport,
            event_tx,
            ws_base: ws_base.into(),
            token: None,
            conversation: Conversation::default(),
            socket_generation: 0,
            epoch: 0,
            cancel: CancellationToken::new(),
            models: vec![],
            current_model_id: None,
            turn_timeout: None,
            last_activity: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_turn_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.turn_timeout = timeout;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_thinking(&self) -> bool {
        self.conversation.is_thinking()
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn current_model_id(&self) -> Option<u64> {
        self.current_model_id
    }

    pub fn current_model(&self) -> Option<&Model> {
        let id = self.current_model_id?;
        self.models.iter().find(|m| m.id == id)
    }

    pub fn generation(&self) -> u64 {
        self.socket_generation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn ready_state(&self) -> ReadyState {
        self.transport.state()
    }

    /// Opens the socket for `conversation_id`. Switching to another id
    /// starts an empty message list and cancels work issued for the old
    /// one; reconnecting to the same id keeps the messages.
    pub fn connect(&mut self, conversation_id: &str) -> Result<()> {
        let url = chat_url(&self.ws_base, conversation_id, self.token.as_deref())
            .wrap_err("building chat url")?;

        if self.socket_generation == 0 || self.conversation.id() != conversation_id {
            self.switch_conversation(conversation_id);
        }

        self.socket_generation = self.transport.connect(&url);
        log::debug!(
            "Conversation {} bound to socket generation {}",
            conversation_id,
            self.socket_generation
        );
        Ok(())
    }

    pub fn disconnect(&mut self) {
        self.transport.disconnect();
        self.conversation.abort_turn("disconnected");
        self.last_activity = None;
    }

    /// Appends the user message and writes it to the socket. A failed write
    /// leaves the message in place and ends the turn.
    pub fn send_message(&mut self, content: &str) -> Result<()> {
        if self.socket_generation == 0 {
            bail!("no conversation is connected");
        }

        self.conversation.begin_turn(content);
        let frame = ClientFrame::user_message(content, self.current_model_id);
        if let Err(err) = self.transport.send(&frame) {
            log::error!("Failed to send message: {}", err);
            self.conversation.end_turn();
            self.last_activity = None;
            return Err(err).wrap_err("sending message");
        }

        self.last_activity = Some(Instant::now());
        Ok(())
    }

    /// Applies one event. Returns true when the conversation or the model
    /// list changed.
    pub fn handle_event(&mut self, event: Event) -> bool {
        if let Some(generation) = event.generation() {
            if generation != self.socket_generation {
                log::debug!(
                    "Dropping event of stale socket generation {} (current {})",
                    generation,
                    self.socket_generation
                );
                return false;
            }
        }

        match event {
            Event::SocketOpened { .. } => {
                log::info!("Conversation {} connected", self.conversation.id());
                true
            }
            Event::SocketFrame { text, .. } => {
                // Any frame counts as a sign of life, even one we cannot use
                self.last_activity = Some(Instant::now());
                match classify(&text) {
                    Ok(Some(server_event)) => {
                        log::trace!("Applying {} event", server_event.kind());
                        self.conversation.apply(server_event);
                        true
                    }
                    Ok(None) => false,
                    Err(err) => {
                        log::error!("Dropping malformed frame: {}", err);
                        false
                    }
                }
            }
            Event::SocketClosed { .. } => self.conversation.abort_turn("connection closed"),
            Event::SocketError { message, .. } => self
                .conversation
                .abort_turn(&format!("connection error: {}", message)),
            Event::ModelsLoaded { epoch, models } => {
                if epoch != self.epoch {
                    log::debug!("Dropping models of stale epoch {}", epoch);
                    return false;
                }
                self.load_models(models);
                true
            }
            Event::ModelsFailed { epoch, message } => {
                if epoch != self.epoch {
                    return false;
                }
                log::error!("Failed to fetch models: {}", message);
                self.models.clear();
                true
            }
        }
    }

    /// Lists models in the background. The result arrives as an event and is
    /// discarded if the conversation changed in the meantime.
    pub fn fetch_models(&self) {
        let api = self.api.clone();
        let token = self.token.clone();
        let event_tx = Arc::clone(&self.event_tx);
        let cancel = self.cancel.clone();
        let epoch = self.epoch;

        tokio::spawn(async move {
            let event = tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("Model fetch of epoch {} cancelled", epoch);
                    return;
                }
                res = api.list_models(token.as_deref()) => match res {
                    Ok(models) => Event::ModelsLoaded { epoch, models },
                    Err(err) => Event::ModelsFailed { epoch, message: format!("{:#}", err) },
                },
            };
            if let Err(err) = event_tx.send(event).await {
                log::debug!("Dropping model list, store is gone: {}", err);
            }
        });
    }

    /// Replaces the model list. An empty list clears the selection.
    pub fn load_models(&mut self, models: Vec<Model>) {
        self.models = models;
        if self.models.is_empty() {
            self.current_model_id = None;
        }
    }

    pub fn set_current_model(&mut self, model_id: Option<u64>) {
        self.current_model_id = model_id;
    }

    /// Aborts the in-flight turn when nothing arrived for longer than the
    /// turn timeout. Returns true when a turn was aborted.
    pub fn check_watchdog(&mut self, now: Instant) -> bool {
        let (Some(timeout), Some(last)) = (self.turn_timeout, self.last_activity) else {
            return false;
        };
        if !self.conversation.is_thinking() || now.saturating_duration_since(last) < timeout {
            return false;
        }
        self.last_activity = None;
        self.conversation
            .abort_turn(&format!("no response for {} seconds", timeout.as_secs()))
    }

    fn switch_conversation(&mut self, conversation_id: &str) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.epoch += 1;
        self.conversation = Conversation::new(conversation_id);
        self.last_activity = None;
    }
}

impl Drop for ChatStore {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
