//! Shared wire model for the SyncArt realtime protocol.
//!
//! This crate owns the message representation used by both `server` and
//! `client`. Every websocket message is a [`Frame`] envelope: a named event
//! plus a JSON payload, carried as a text frame. The envelope stays flexible
//! (`serde_json::Value`) while the per-event payloads in [`payload`] and the
//! canvas model in [`element`] are fully typed.

pub mod element;
pub mod payload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use element::{DrawingElement, ElementKind, Point};
pub use payload::{ChatBody, ChatBroadcast, ChatSend, ElementPayload, ElementsPayload, JoinAck, JoinRequest, User};

// =============================================================================
// EVENT NAMES
// =============================================================================

/// Join intent, client to server.
pub const USER_JOINED: &str = "userJoined";

/// Join acknowledgement, server to the joining connection only.
pub const USER_IS_JOINED: &str = "userIsJoined";

/// Member list sync, server to every member of a room.
pub const UPDATE_USERS: &str = "updateUsers";

/// Incremental stroke append. Relayed to the room minus the origin.
pub const DRAW_ELEMENT: &str = "drawElement";

/// Single-element in-place replace. Relayed to the room minus the origin.
pub const UPDATE_ELEMENT: &str = "updateElement";

/// Full element-log resync. Relayed to the room minus the origin.
pub const UPDATE_DRAWING: &str = "updateDrawing";

/// Chat relay. Broadcast to every member of a room, sender included.
pub const CHAT_MESSAGE: &str = "chatMessage";

// =============================================================================
// CODEC ERRORS
// =============================================================================

/// Error returned when a frame or payload cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw text could not be decoded as a frame envelope.
    #[error("failed to decode frame: {0}")]
    Decode(#[from] serde_json::Error),
    /// The envelope decoded, but its payload does not match the event's shape.
    #[error("invalid payload for `{event}`: {source}")]
    InvalidPayload {
        event: String,
        source: serde_json::Error,
    },
}

// =============================================================================
// FRAME
// =============================================================================

/// A single message on the realtime wire: a named event plus its payload.
///
/// The websocket transport multiplexes all event types over one connection;
/// handlers route on `event` and decode `data` into a typed payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    /// Event name, e.g. `"drawElement"`.
    pub event: String,
    /// Event payload. Shape depends on `event`.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Frame {
    /// Build a frame from an event name and a serializable payload.
    ///
    /// # Panics
    ///
    /// Never panics in practice; the payload types in this crate always
    /// serialize to JSON.
    pub fn new(event: impl Into<String>, data: &impl Serialize) -> Self {
        Self {
            event: event.into(),
            data: serde_json::to_value(data).unwrap_or_default(),
        }
    }

    /// Decode this frame's payload into a typed value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidPayload`] when `data` does not match the
    /// expected shape for the event.
    pub fn payload<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        serde_json::from_value(self.data.clone()).map_err(|source| CodecError::InvalidPayload {
            event: self.event.clone(),
            source,
        })
    }
}

// =============================================================================
// CODEC
// =============================================================================

/// Encode a frame into websocket text.
///
/// # Panics
///
/// Never panics in practice; a `Frame` always serializes to JSON.
#[must_use]
pub fn encode_frame(frame: &Frame) -> String {
    serde_json::to_string(frame).unwrap_or_default()
}

/// Decode websocket text into a frame envelope.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed text.
pub fn decode_frame(text: &str) -> Result<Frame, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
