//! WebSocket handler — the per-connection session.
//!
//! DESIGN
//! ======
//! On upgrade, the connection enters a `select!` loop:
//! - Incoming client frames → parse + dispatch by event name
//! - Broadcast frames from room peers → forward to the socket
//!
//! Handler functions are pure business logic — they validate, mutate the
//! registry, and return an `Outcome`. The dispatch layer owns all outbound
//! concerns: replies to the origin and broadcasts to the room. Room-wide
//! announcements (chat, rosters) route through every member's channel, the
//! origin's included, so the order each client observes is the server's
//! single processing order.
//!
//! Malformed payloads, unknown events, and writes to unknown rooms are
//! dropped — logged, never answered with an error frame, never a crash.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → client sends `userJoined` → member + sender registered
//! 2. Client frames → dispatch → handler returns Outcome
//! 3. Dispatch applies Outcome (reply / relay / announce)
//! 4. Close → remove the user from every room → broadcast fresh rosters

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use protocol::{
    ChatBroadcast, ChatSend, ElementPayload, ElementsPayload, Frame, JoinAck, JoinRequest,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::services::room;
use crate::state::AppState;

// =============================================================================
// OUTCOME
// =============================================================================

/// Result returned by handler functions. The dispatch layer uses this to
/// decide who receives what — handlers never send frames directly.
enum Outcome {
    /// Broadcast to the room excluding the origin; the sender already has
    /// the change locally.
    Relay { room_id: String, frame: Frame },
    /// Broadcast to the whole room through the member channels, origin
    /// included. Used for chat and rosters, where every participant must
    /// observe the same order.
    Announce { room_id: String, frame: Frame },
    /// Join: ack and snapshot to the origin, roster to the whole room.
    ReplyAndAnnounce {
        room_id: String,
        reply: Vec<Frame>,
        announce: Frame,
    },
    /// Drop the event.
    Ignore,
}

/// Per-connection session state, recorded at join.
#[derive(Default)]
struct Session {
    /// The joining user's id; doubles as the connection identity that
    /// disconnect cleanup matches against.
    user_id: Option<Uuid>,
    /// Outgoing chat is stamped with this name rather than trusting the
    /// client on every message.
    display_name: String,
}

// =============================================================================
// UPGRADE
// =============================================================================

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

// =============================================================================
// CONNECTION
// =============================================================================

async fn run_ws(mut socket: WebSocket, state: AppState) {
    // Per-connection channel for receiving broadcast frames from peers.
    let (client_tx, mut client_rx) = mpsc::channel::<Frame>(256);
    let mut session = Session::default();

    info!("ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => {
                        let sender_frames =
                            process_inbound_text(&state, &mut session, &client_tx, text.as_str()).await;
                        for frame in sender_frames {
                            let _ = send_frame(&mut socket, &frame).await;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            Some(frame) = client_rx.recv() => {
                if send_frame(&mut socket, &frame).await.is_err() {
                    break;
                }
            }
        }
    }

    cleanup_session(&state, &session).await;
    info!("ws: client disconnected");
}

/// Remove the session's user from every room it appears in and broadcast
/// the fresh member lists. The scan must not assume a single room per
/// connection.
async fn cleanup_session(state: &AppState, session: &Session) {
    let Some(user_id) = session.user_id else {
        return;
    };
    for (room_id, users) in room::remove_user_everywhere(state, user_id).await {
        let frame = Frame::new(protocol::UPDATE_USERS, &users);
        room::broadcast(state, &room_id, &frame, None).await;
    }
}

// =============================================================================
// FRAME DISPATCH
// =============================================================================

/// Parse and process one inbound text frame and return frames for the
/// origin. Split from the socket loop so tests can exercise dispatch and
/// broadcast behavior without a live connection.
async fn process_inbound_text(
    state: &AppState,
    session: &mut Session,
    client_tx: &mpsc::Sender<Frame>,
    text: &str,
) -> Vec<Frame> {
    let req = match protocol::decode_frame(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!(error = %e, "ws: invalid inbound frame");
            return Vec::new();
        }
    };

    // Live-stroke traffic is too chatty to log per frame.
    if req.event != protocol::DRAW_ELEMENT {
        debug!(event = %req.event, "ws: recv frame");
    }

    let outcome = match req.event.as_str() {
        protocol::USER_JOINED => handle_join(state, session, client_tx, &req).await,
        protocol::DRAW_ELEMENT => handle_draw(state, &req).await,
        protocol::UPDATE_ELEMENT => handle_update_element(state, &req).await,
        protocol::UPDATE_DRAWING => handle_update_drawing(state, &req).await,
        protocol::CHAT_MESSAGE => handle_chat(session, &req),
        other => {
            warn!(event = %other, "ws: unknown event dropped");
            Outcome::Ignore
        }
    };

    apply_outcome(state, session, outcome).await
}

/// Apply an outcome — the dispatch layer owns all outbound logic.
async fn apply_outcome(state: &AppState, session: &Session, outcome: Outcome) -> Vec<Frame> {
    match outcome {
        Outcome::Relay { room_id, frame } => {
            room::broadcast(state, &room_id, &frame, session.user_id).await;
            Vec::new()
        }
        Outcome::Announce { room_id, frame } => {
            room::broadcast(state, &room_id, &frame, None).await;
            Vec::new()
        }
        Outcome::ReplyAndAnnounce { room_id, reply, announce } => {
            room::broadcast(state, &room_id, &announce, None).await;
            reply
        }
        Outcome::Ignore => Vec::new(),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn handle_join(
    state: &AppState,
    session: &mut Session,
    client_tx: &mpsc::Sender<Frame>,
    req: &Frame,
) -> Outcome {
    let join: JoinRequest = match req.payload() {
        Ok(join) => join,
        Err(e) => {
            warn!(error = %e, "ws: malformed join dropped");
            return Outcome::Ignore;
        }
    };

    session.user_id = Some(join.user_id);
    session.display_name = join.name.clone();

    let (users, elements) =
        room::add_member(state, &join.room_id, join.user_id, &join.name, client_tx.clone()).await;

    info!(
        room_id = %join.room_id,
        user_id = %join.user_id,
        name = %join.name,
        host = join.host,
        presenter = join.presenter,
        "ws: user joined"
    );

    // Ack and the current element log go to the joining connection only;
    // the whole room, new member included, gets the fresh roster.
    Outcome::ReplyAndAnnounce {
        room_id: join.room_id,
        reply: vec![
            Frame::new(protocol::USER_IS_JOINED, &JoinAck { success: true }),
            Frame::new(protocol::UPDATE_DRAWING, &elements),
        ],
        announce: Frame::new(protocol::UPDATE_USERS, &users),
    }
}

async fn handle_draw(state: &AppState, req: &Frame) -> Outcome {
    let ElementPayload { room_id, element } = match req.payload() {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: malformed drawElement dropped");
            return Outcome::Ignore;
        }
    };

    if !room::exists(state, &room_id).await {
        debug!(%room_id, "ws: drawElement for unknown room dropped");
        return Outcome::Ignore;
    }

    room::append_element(state, &room_id, element.clone()).await;
    Outcome::Relay { room_id, frame: Frame::new(protocol::DRAW_ELEMENT, &element) }
}

async fn handle_update_element(state: &AppState, req: &Frame) -> Outcome {
    let ElementPayload { room_id, element } = match req.payload() {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: malformed updateElement dropped");
            return Outcome::Ignore;
        }
    };

    if !room::exists(state, &room_id).await {
        debug!(%room_id, "ws: updateElement for unknown room dropped");
        return Outcome::Ignore;
    }

    // Relay whether or not the replace matched: clients are the visual
    // source of truth, and dropping the update would desync peers further.
    if !room::replace_element(state, &room_id, &element).await {
        debug!(%room_id, element_id = %element.id, "ws: updateElement matched nothing");
    }
    Outcome::Relay { room_id, frame: Frame::new(protocol::UPDATE_ELEMENT, &element) }
}

async fn handle_update_drawing(state: &AppState, req: &Frame) -> Outcome {
    let ElementsPayload { room_id, elements } = match req.payload() {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: malformed updateDrawing dropped");
            return Outcome::Ignore;
        }
    };

    if !room::exists(state, &room_id).await {
        debug!(%room_id, "ws: updateDrawing for unknown room dropped");
        return Outcome::Ignore;
    }

    room::set_elements(state, &room_id, elements.clone()).await;
    Outcome::Relay { room_id, frame: Frame::new(protocol::UPDATE_DRAWING, &elements) }
}

fn handle_chat(session: &Session, req: &Frame) -> Outcome {
    let ChatSend { room_id, message, .. } = match req.payload() {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "ws: malformed chatMessage dropped");
            return Outcome::Ignore;
        }
    };

    // Everyone, sender included, renders the message on receipt of this
    // broadcast; an unknown room simply has nobody to deliver to.
    Outcome::Announce {
        room_id,
        frame: Frame::new(
            protocol::CHAT_MESSAGE,
            &ChatBroadcast { message, name: session.display_name.clone() },
        ),
    }
}

// =============================================================================
// HELPERS
// =============================================================================

async fn send_frame(socket: &mut WebSocket, frame: &Frame) -> Result<(), ()> {
    let json = protocol::encode_frame(frame);
    socket.send(Message::Text(json.into())).await.map_err(|_| ())
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
