pub mod auth;
pub mod event;
pub mod frame;
pub mod message;
pub mod model;
pub mod provider;
pub mod task;

pub use auth::*;
pub use event::{ArcEventTx, Event, EventTx};
pub use frame::{ClientFrame, ServerEvent};
pub use message::{Message, Role};
pub use model::*;
pub use provider::{PredefinedProvider, ProviderType, predefined_providers, provider_by_id};
pub use task::Task;
