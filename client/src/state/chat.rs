//! State for the room chat feed.
//!
//! No history is kept server-side; this is purely what arrived while the
//! connection was up. The local user's own messages appear here only once
//! the server's broadcast comes back, so every participant sees the same
//! order.

/// The chat feed.
#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
}

/// A single rendered chat line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: String,
    pub message: String,
}
