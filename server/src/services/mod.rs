//! Service layer.
//!
//! Handlers in `routes` stay transport-shaped; the room registry logic that
//! they call lives here so tests can drive it without a socket.

pub mod room;
