//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! holds the room registry: a map from room id to live room state. It is an
//! explicitly owned service object, never a module-level singleton, so tests
//! construct isolated instances per case. Rooms are created on first join and
//! never destroyed; abandoned rooms persist until process restart, a known
//! resource tradeoff of the design.

use std::collections::HashMap;
use std::sync::Arc;

use protocol::{DrawingElement, Frame, User};
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

// =============================================================================
// ROOM STATE
// =============================================================================

/// A room member's profile, keyed by user id in [`Room::members`].
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
}

/// Per-room live state: membership, broadcast group, and the canonical
/// element log (ordered by server acceptance, not creation time).
pub struct Room {
    /// Members keyed by user id. Keying by id is what guarantees the dedup
    /// invariant: a re-joining user replaces its entry, never duplicates it.
    pub members: HashMap<Uuid, Member>,
    /// Connected members: user id -> sender for outgoing frames.
    pub clients: HashMap<Uuid, mpsc::Sender<Frame>>,
    /// The authoritative stroke log.
    pub elements: Vec<DrawingElement>,
}

impl Room {
    #[must_use]
    pub fn new() -> Self {
        Self { members: HashMap::new(), clients: HashMap::new(), elements: Vec::new() }
    }

    /// Member list in a stable order for `updateUsers` payloads.
    #[must_use]
    pub fn user_list(&self) -> Vec<User> {
        let mut users: Vec<User> = self
            .members
            .iter()
            .map(|(user_id, member)| User { user_id: *user_id, name: member.name.clone() })
            .collect();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        users
    }
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — the registry is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<RwLock<HashMap<String, Room>>>,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self { rooms: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_new_is_empty() {
        let room = Room::new();
        assert!(room.members.is_empty());
        assert!(room.clients.is_empty());
        assert!(room.elements.is_empty());
    }

    #[test]
    fn user_list_is_sorted_by_user_id() {
        let mut room = Room::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        room.members.insert(a, Member { name: "a".into() });
        room.members.insert(b, Member { name: "b".into() });

        let users = room.user_list();
        assert_eq!(users.len(), 2);
        assert!(users[0].user_id < users[1].user_id);
    }

    #[tokio::test]
    async fn app_state_instances_are_isolated() {
        let first = AppState::new();
        let second = AppState::new();
        test_helpers::seed_room(&first, "r1").await;

        assert!(first.rooms.read().await.contains_key("r1"));
        assert!(second.rooms.read().await.is_empty());
    }
}
