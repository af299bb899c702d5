//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`canvas`, `chat`, `roster`) so embedders can
//! depend on small focused models.

pub mod canvas;
pub mod chat;
pub mod roster;
