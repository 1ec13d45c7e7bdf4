#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

use std::sync::Arc;

use eyre::{Context, Result};
use tokio::sync::mpsc;

use crate::api::ApiClient;
use crate::chat::ChatStore;
use crate::config::Configuration;
use crate::models::{ArcEventTx, Event, LoginResponse, ResetPasswordResponse};
use crate::router::{Route, guard};
use crate::session::Session;
use crate::settings::{ThemeState, detect_system_dark, load_locale, set_locale};
use crate::storage::{ArcStorage, new_storage};
use crate::transport::{BoxTransport, WsTransport};

/// Everything the application needs for one run, built once at start-up.
pub struct AppContext {
    config: Configuration,
    storage: ArcStorage,
    session: Session,
    theme: ThemeState,
    locale: String,
    chat: ChatStore,
    event_rx: mpsc::UnboundedReceiver<Event>,
}

impl AppContext {
    pub async fn init(config: &Configuration) -> Result<Self> {
        let storage = new_storage(&config.storage)
            .await
            .wrap_err("initializing storage")?;

        let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();
        let event_tx: ArcEventTx = Arc::new(event_tx);
        let transport = Box::new(WsTransport::new(Arc::clone(&event_tx)));

        Self::new(config, storage, transport, event_tx, event_rx).await
    }

    pub async fn new(
        config: &Configuration,
        storage: ArcStorage,
        transport: BoxTransport,
        event_tx: ArcEventTx,
        event_rx: mpsc::UnboundedReceiver<Event>,
    ) -> Result<Self> {
        let api = ApiClient::from(&config.api);

        let mut session = Session::new(api.clone(), Arc::clone(&storage));
        session.restore().await?;

        let theme = ThemeState::load(Arc::clone(&storage), detect_system_dark()).await?;
        let locale = load_locale(&storage).await?;

        let mut chat = ChatStore::new(api, transport, event_tx, &config.api.ws_url)
            .with_token(session.token().map(str::to_string))
            .with_turn_timeout(config.chat.turn_timeout());
        chat.set_current_model(config.chat.default_model);

        Ok(Self {
            config: config.clone(),
            storage,
            session,
            theme,
            locale,
            chat,
            event_rx,
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn chat(&self) -> &ChatStore {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatStore {
        &mut self.chat
    }

    pub fn theme(&self) -> &ThemeState {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeState {
        &mut self.theme
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub async fn set_locale(&mut self, code: &str) -> Result<()> {
        set_locale(&self.storage, code).await?;
        self.locale = code.to_string();
        Ok(())
    }

    /// Runs the route guard and returns where the navigation lands.
    pub async fn navigate(&mut self, to: Route) -> Result<Route> {
        let landed = guard(&mut self.session, to).await?;
        self.sync_token();
        Ok(landed)
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Result<LoginResponse> {
        let res = self.session.login(username, password).await?;
        self.sync_token();
        Ok(res)
    }

    pub async fn reset_password(
        &mut self,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<ResetPasswordResponse> {
        self.session
            .reset_password(old_password, new_password, new_password_confirm)
            .await
    }

    /// Connects the chat to `conversation_id` and refreshes the model list.
    pub fn open_conversation(&mut self, conversation_id: &str) -> Result<()> {
        self.chat.connect(conversation_id)?;
        self.chat.fetch_models();
        Ok(())
    }

    /// Tears the session down: the socket is closed, models are dropped
    /// and the stored token is removed.
    pub async fn logout(&mut self) -> Result<()> {
        self.chat.disconnect();
        self.chat.load_models(vec![]);
        self.chat.set_current_model(self.config.chat.default_model);
        self.session.logout().await?;
        self.sync_token();
        log::info!("Logged out");
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    fn sync_token(&mut self) {
        self.chat.set_token(self.session.token().map(str::to_string));
    }
}
