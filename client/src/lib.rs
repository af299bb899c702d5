//! UI-free client core for SyncArt.
//!
//! DESIGN
//! ======
//! Every client — the terminal client here, a browser canvas elsewhere —
//! embeds the same sync engine: a local mirror of the room's element log and
//! roster, the chat feed, and the local-only undo/redo stacks. Rendering and
//! input handling live with the embedder; this crate owns everything that
//! must stay consistent with the server.

pub mod state;
pub mod sync;

pub use sync::SyncEngine;
