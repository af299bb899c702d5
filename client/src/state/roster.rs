//! State for the room member list.

use protocol::User;

/// Who is currently in the room, as last broadcast by the server.
#[derive(Clone, Debug, Default)]
pub struct RosterState {
    pub users: Vec<User>,
}
