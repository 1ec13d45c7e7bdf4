#[cfg(test)]
#[path = "websocket_test.rs"]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message as WsMessage};
use tokio_util::sync::CancellationToken;

use crate::models::{ArcEventTx, ClientFrame, Event};

use super::{ReadyState, Transport, TransportError, redact};

pub struct WsTransport {
    event_tx: ArcEventTx,
    generation: u64,
    state: Arc<AtomicU8>,
    outgoing: Option<mpsc::UnboundedSender<WsMessage>>,
    cancel: Option<CancellationToken>,
}

impl WsTransport {
    pub fn new(event_tx: ArcEventTx) -> Self {
        Self {
            event_tx,
            generation: 0,
            state: Arc::new(AtomicU8::new(ReadyState::Closed as u8)),
            outgoing: None,
            cancel: None,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Transport for WsTransport {
    fn connect(&mut self, url: &str) -> u64 {
        self.disconnect();

        self.generation += 1;
        let state = Arc::new(AtomicU8::new(ReadyState::Connecting as u8));
        let (outgoing_tx, outgoing_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();

        self.state = Arc::clone(&state);
        self.outgoing = Some(outgoing_tx);
        self.cancel = Some(cancel.clone());

        tokio::spawn(run_socket(
            url.to_string(),
            self.generation,
            state,
            outgoing_rx,
            cancel,
            Arc::clone(&self.event_tx),
        ));

        self.generation
    }

    fn send(&self, frame: &ClientFrame) -> Result<(), TransportError> {
        if self.state() != ReadyState::Open {
            return Err(TransportError::NotConnected);
        }
        let outgoing = self.outgoing.as_ref().ok_or(TransportError::NotConnected)?;
        let payload = serde_json::to_string(frame)?;
        outgoing
            .send(WsMessage::Text(payload))
            .map_err(|_| TransportError::NotConnected)
    }

    fn disconnect(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            self.state.store(ReadyState::Closed as u8, Ordering::SeqCst);
            cancel.cancel();
        }
        self.outgoing = None;
    }

    fn state(&self) -> ReadyState {
        ReadyState::from(self.state.load(Ordering::SeqCst))
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn run_socket(
    url: String,
    generation: u64,
    state: Arc<AtomicU8>,
    mut outgoing_rx: mpsc::UnboundedReceiver<WsMessage>,
    cancel: CancellationToken,
    event_tx: ArcEventTx,
) {
    log::info!("Connecting to WebSocket: {}", redact(&url));

    let connected = tokio::select! {
        _ = cancel.cancelled() => {
            state.store(ReadyState::Closed as u8, Ordering::SeqCst);
            return;
        }
        res = connect_async(url.as_str()) => res,
    };

    let ws_stream = match connected {
        Ok((ws_stream, _)) => ws_stream,
        Err(err) => {
            log::error!("WebSocket error: {}", err);
            state.store(ReadyState::Closed as u8, Ordering::SeqCst);
            emit(
                &event_tx,
                Event::SocketError {
                    generation,
                    message: err.to_string(),
                },
            )
            .await;
            return;
        }
    };

    // A disconnect that raced the handshake wins
    if state
        .compare_exchange(
            ReadyState::Connecting as u8,
            ReadyState::Open as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_err()
    {
        state.store(ReadyState::Closed as u8, Ordering::SeqCst);
        return;
    }
    log::info!("WebSocket connected (generation {})", generation);
    emit(&event_tx, Event::SocketOpened { generation }).await;

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                log::debug!("WebSocket generation {} closed locally", generation);
                let _ = write.send(WsMessage::Close(None)).await;
                emit(&event_tx, Event::SocketClosed { generation }).await;
                break;
            }

            Some(msg) = outgoing_rx.recv() => {
                if let Err(err) = write.send(msg).await {
                    log::error!("WebSocket error: {}", err);
                    emit(&event_tx, Event::SocketError { generation, message: err.to_string() }).await;
                    break;
                }
            }

            frame = read.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    log::trace!("WebSocket frame: {}", text);
                    emit(&event_tx, Event::SocketFrame { generation, text }).await;
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    log::info!("WebSocket disconnected");
                    emit(&event_tx, Event::SocketClosed { generation }).await;
                    break;
                }
                Some(Ok(_)) => continue,
                Some(Err(err)) => {
                    log::error!("WebSocket error: {}", err);
                    emit(&event_tx, Event::SocketError { generation, message: err.to_string() }).await;
                    break;
                }
            }
        }
    }

    state.store(ReadyState::Closed as u8, Ordering::SeqCst);
}

async fn emit(event_tx: &ArcEventTx, event: Event) {
    if let Err(err) = event_tx.send(event).await {
        log::debug!("Dropping socket event, store is gone: {}", err);
    }
}
