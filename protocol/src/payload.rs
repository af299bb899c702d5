//! Typed payloads for each wire event.
//!
//! Field names follow the wire's camelCase convention. Client-to-server
//! payloads carry the target `roomId`; server-to-client copies drop it, since
//! a connection only receives traffic for rooms it belongs to.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::element::DrawingElement;

/// A room member as seen in `updateUsers` lists and snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: Uuid,
    pub name: String,
}

/// `userJoined` — join intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub name: String,
    pub user_id: Uuid,
    pub room_id: String,
    #[serde(default)]
    pub host: bool,
    #[serde(default)]
    pub presenter: bool,
}

/// `userIsJoined` — join acknowledgement, sent to the origin only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JoinAck {
    pub success: bool,
}

/// `drawElement` / `updateElement` — one element, client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPayload {
    pub room_id: String,
    pub element: DrawingElement,
}

/// `updateDrawing` — the full element log, client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementsPayload {
    pub room_id: String,
    pub elements: Vec<DrawingElement>,
}

/// Chat message body. Nested under `message` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatBody {
    pub message: String,
}

/// `chatMessage` — client to server.
///
/// `userId` is optional and unused server-side: the server stamps outgoing
/// chat with the display name it recorded at join rather than trusting the
/// client on every message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSend {
    pub room_id: String,
    pub message: ChatBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
}

/// `chatMessage` — server to every room member, sender included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatBroadcast {
    pub message: ChatBody,
    pub name: String,
}
