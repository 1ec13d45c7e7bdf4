pub mod websocket;

pub use websocket::WsTransport;

#[cfg(test)]
use mockall::automock;

use eyre::{Context, Result};
use reqwest::Url;
use thiserror::Error;

use crate::models::ClientFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReadyState {
    Connecting = 0,
    Open = 1,
    Closing = 2,
    Closed = 3,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket is not connected")]
    NotConnected,
    #[error("encoding frame: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One chat socket at a time. Reconnecting is always an explicit `connect`.
#[cfg_attr(test, automock)]
pub trait Transport {
    /// Closes the current socket, if any, and opens a new one. Returns the
    /// generation that tags every event produced by the new socket.
    fn connect(&mut self, url: &str) -> u64;

    /// Writes the frame iff the socket is open. Nothing is queued.
    fn send(&self, frame: &ClientFrame) -> Result<(), TransportError>;

    fn disconnect(&mut self);

    fn state(&self) -> ReadyState;
}

pub type BoxTransport = Box<dyn Transport + Send>;

impl From<u8> for ReadyState {
    fn from(value: u8) -> Self {
        match value {
            0 => ReadyState::Connecting,
            1 => ReadyState::Open,
            2 => ReadyState::Closing,
            _ => ReadyState::Closed,
        }
    }
}

/// Builds `{ws_base}/ws/chat/{conversation_id}` with the token attached as
/// a query parameter when there is one.
pub fn chat_url(ws_base: &str, conversation_id: &str, token: Option<&str>) -> Result<String> {
    let raw = format!(
        "{}/ws/chat/{}",
        ws_base.trim_end_matches('/'),
        conversation_id
    );
    let mut url = Url::parse(&raw).wrap_err(format!("parsing websocket url {}", raw))?;
    if let Some(token) = token.filter(|t| !t.is_empty()) {
        url.query_pairs_mut().append_pair("token", token);
    }
    Ok(url.to_string())
}

/// Strips the query so tokens never end up in the log.
pub(crate) fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
