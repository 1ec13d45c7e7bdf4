use std::sync::Arc;

use tokio::sync::mpsc;

use super::Model;

/// Everything that reaches the chat store from outside its own call stack.
/// Socket events carry the generation of the connection that produced them
/// and model results carry the conversation epoch they were requested in,
/// so the store can drop anything that outlived a reconnect or a switch.
#[derive(Debug)]
pub enum Event {
    SocketOpened { generation: u64 },
    SocketFrame { generation: u64, text: String },
    SocketClosed { generation: u64 },
    SocketError { generation: u64, message: String },

    ModelsLoaded { epoch: u64, models: Vec<Model> },
    ModelsFailed { epoch: u64, message: String },
}

impl Event {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Event::SocketOpened { generation }
            | Event::SocketFrame { generation, .. }
            | Event::SocketClosed { generation }
            | Event::SocketError { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

#[async_trait::async_trait]
pub trait EventTx {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>>;
}

#[async_trait::async_trait]
impl EventTx for mpsc::Sender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event).await
    }
}

#[async_trait::async_trait]
impl EventTx for mpsc::UnboundedSender<Event> {
    async fn send(&self, event: Event) -> Result<(), mpsc::error::SendError<Event>> {
        self.send(event)
    }
}

pub type ArcEventTx = Arc<dyn EventTx + Send + Sync>;
