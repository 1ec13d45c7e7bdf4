pub mod classifier;
pub mod reducer;
pub mod store;

pub use classifier::{DecodeError, classify};
pub use reducer::{Conversation, StreamState};
pub use store::ChatStore;
