//! Room registry — the single source of truth for membership and element logs.
//!
//! DESIGN
//! ======
//! Write operations materialize their room on first touch (`ensure_room`
//! semantics) and never fail; only reads surface `NotFound`, which the REST
//! layer maps to 404. Unmatched in-place updates are silent no-ops: the
//! server favors availability over strict validation, and the full-log
//! resync path guarantees convergence regardless.
//!
//! Rooms are never evicted. A member leaving (or every member leaving)
//! shrinks the maps but keeps the room and its log alive until restart.

use protocol::{DrawingElement, Frame, User};
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use crate::state::{AppState, Member};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    #[error("room not found: {0}")]
    NotFound(String),
}

/// Read-only view of a room for a newly joined client.
#[derive(Debug, Clone)]
pub struct RoomSnapshot {
    pub members: Vec<User>,
    pub elements: Vec<DrawingElement>,
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Get-or-create a room. Idempotent.
pub async fn ensure_room(state: &AppState, room_id: &str) {
    let mut rooms = state.rooms.write().await;
    rooms.entry(room_id.to_owned()).or_default();
}

/// Whether a room id has been seen. Write events on unknown rooms are
/// dropped by the session layer rather than creating rooms as a side effect.
pub async fn exists(state: &AppState, room_id: &str) -> bool {
    state.rooms.read().await.contains_key(room_id)
}

/// Append one element to a room's log, materializing the room if needed.
pub async fn append_element(state: &AppState, room_id: &str, element: DrawingElement) {
    let mut rooms = state.rooms.write().await;
    rooms.entry(room_id.to_owned()).or_default().elements.push(element);
}

/// Replace the first element whose id matches, in place. Returns whether a
/// match was found; an unmatched id leaves the log untouched.
pub async fn replace_element(state: &AppState, room_id: &str, element: &DrawingElement) -> bool {
    let mut rooms = state.rooms.write().await;
    let room = rooms.entry(room_id.to_owned()).or_default();
    match room.elements.iter_mut().find(|el| el.id == element.id) {
        Some(slot) => {
            *slot = element.clone();
            true
        }
        None => false,
    }
}

/// Wholesale replace of a room's log. Used for undo/redo/clear and bulk
/// resync, where the whole log is cheap to resend at this scale.
pub async fn set_elements(state: &AppState, room_id: &str, elements: Vec<DrawingElement>) {
    let mut rooms = state.rooms.write().await;
    rooms.entry(room_id.to_owned()).or_default().elements = elements;
}

/// Read-only snapshot for a newly joined client.
///
/// # Errors
///
/// Returns [`RoomError::NotFound`] for an unseen room id.
pub async fn snapshot(state: &AppState, room_id: &str) -> Result<RoomSnapshot, RoomError> {
    let rooms = state.rooms.read().await;
    let room = rooms
        .get(room_id)
        .ok_or_else(|| RoomError::NotFound(room_id.to_owned()))?;
    Ok(RoomSnapshot { members: room.user_list(), elements: room.elements.clone() })
}

/// Current member list for the REST surface.
///
/// # Errors
///
/// Returns [`RoomError::NotFound`] for an unseen room id.
pub async fn member_list(state: &AppState, room_id: &str) -> Result<Vec<User>, RoomError> {
    snapshot(state, room_id).await.map(|snap| snap.members)
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

/// Join a room: insert-or-update the member keyed by user id and register
/// its broadcast sender. Returns the post-join member list and the current
/// element log, read under the same lock.
pub async fn add_member(
    state: &AppState,
    room_id: &str,
    user_id: Uuid,
    name: &str,
    tx: mpsc::Sender<Frame>,
) -> (Vec<User>, Vec<DrawingElement>) {
    let mut rooms = state.rooms.write().await;
    let room = rooms.entry(room_id.to_owned()).or_default();

    room.members.insert(user_id, Member { name: name.to_owned() });
    room.clients.insert(user_id, tx);

    info!(%room_id, %user_id, members = room.members.len(), "member joined room");
    (room.user_list(), room.elements.clone())
}

/// Remove one member from one room. No-op if absent.
pub async fn remove_member(state: &AppState, room_id: &str, user_id: Uuid) {
    let mut rooms = state.rooms.write().await;
    let Some(room) = rooms.get_mut(room_id) else {
        return;
    };
    room.members.remove(&user_id);
    room.clients.remove(&user_id);
}

/// Disconnect cleanup: remove the user from every room it appears in and
/// return each affected room with its fresh member list, so the caller can
/// broadcast updated rosters. Scans all rooms — a connection is not assumed
/// to belong to only one.
pub async fn remove_user_everywhere(state: &AppState, user_id: Uuid) -> Vec<(String, Vec<User>)> {
    let mut rooms = state.rooms.write().await;
    let mut affected = Vec::new();
    for (room_id, room) in rooms.iter_mut() {
        if room.members.remove(&user_id).is_some() {
            room.clients.remove(&user_id);
            info!(%room_id, %user_id, remaining = room.members.len(), "member left room");
            affected.push((room_id.clone(), room.user_list()));
        }
    }
    affected
}

// =============================================================================
// BROADCAST
// =============================================================================

/// Broadcast a frame to all members of a room, optionally excluding one.
/// A no-op for unknown rooms.
pub async fn broadcast(state: &AppState, room_id: &str, frame: &Frame, exclude: Option<Uuid>) {
    let rooms = state.rooms.read().await;
    let Some(room) = rooms.get(room_id) else {
        return;
    };

    for (user_id, tx) in &room.clients {
        if exclude == Some(*user_id) {
            continue;
        }
        // Best-effort: if a client's channel is full, skip it.
        let _ = tx.try_send(frame.clone());
    }
}

#[cfg(test)]
#[path = "room_test.rs"]
mod tests;
