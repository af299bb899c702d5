//! The sync engine: applies server frames to local state and produces the
//! outbound frames for local actions.
//!
//! DESIGN
//! ======
//! Two emission paths keep peers converged. While a stroke is live, the
//! engine emits best-effort incremental events: `drawElement` when the
//! stroke begins, `updateElement` as it grows (well-defined because every
//! element gets its id before the first emission). On commit — and on undo,
//! redo, and clear — it emits the authoritative full-log `updateDrawing`.
//! The incremental path gives peers low-latency feedback; the full-log path
//! guarantees convergence even if an incremental message was dropped.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use protocol::{
    ChatBody, ChatBroadcast, ChatSend, CodecError, DrawingElement, ElementKind, ElementPayload,
    ElementsPayload, Frame, JoinAck, JoinRequest, Point, User,
};
use uuid::Uuid;

use crate::state::canvas::CanvasState;
use crate::state::chat::{ChatMessage, ChatState};
use crate::state::roster::RosterState;

/// One client's view of one room, kept consistent with the server.
pub struct SyncEngine {
    room_id: String,
    user: User,
    host: bool,
    joined: bool,
    pub canvas: CanvasState,
    pub roster: RosterState,
    pub chat: ChatState,
}

impl SyncEngine {
    /// Create an engine for `name` in `room_id` with a fresh user id.
    /// `host` marks the room creator; hosts also start as presenter.
    #[must_use]
    pub fn new(room_id: impl Into<String>, name: impl Into<String>, host: bool) -> Self {
        Self {
            room_id: room_id.into(),
            user: User { user_id: Uuid::new_v4(), name: name.into() },
            host,
            joined: false,
            canvas: CanvasState::new(),
            roster: RosterState::default(),
            chat: ChatState::default(),
        }
    }

    #[must_use]
    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Whether the server has acknowledged the join.
    #[must_use]
    pub fn is_joined(&self) -> bool {
        self.joined
    }

    // =========================================================================
    // OUTBOUND
    // =========================================================================

    /// The join intent to send right after connecting.
    #[must_use]
    pub fn join_frame(&self) -> Frame {
        Frame::new(
            protocol::USER_JOINED,
            &JoinRequest {
                name: self.user.name.clone(),
                user_id: self.user.user_id,
                room_id: self.room_id.clone(),
                host: self.host,
                presenter: self.host,
            },
        )
    }

    /// Start a stroke at `at`. The element gets its stable id here, before
    /// anything is emitted. An unfinished previous stroke is discarded; the
    /// pointer can only draw one at a time.
    pub fn begin_stroke(&mut self, kind: ElementKind, at: Point, color: &str) -> Frame {
        let element = DrawingElement::begin(kind, at, color);
        self.canvas.stroke = Some(element.clone());
        Frame::new(
            protocol::DRAW_ELEMENT,
            &ElementPayload { room_id: self.room_id.clone(), element },
        )
    }

    /// Grow the live stroke toward `to`. `None` when no stroke is live.
    pub fn extend_stroke(&mut self, to: Point) -> Option<Frame> {
        let stroke = self.canvas.stroke.as_mut()?;
        stroke.extend(to);
        Some(Frame::new(
            protocol::UPDATE_ELEMENT,
            &ElementPayload { room_id: self.room_id.clone(), element: stroke.clone() },
        ))
    }

    /// Finish the live stroke: append it to the local log, snapshot history,
    /// and emit the full log. `None` when no stroke is live.
    pub fn commit_stroke(&mut self) -> Option<Frame> {
        let element = self.canvas.stroke.take()?;
        let elements = self.canvas.commit(element);
        Some(self.full_log_frame(elements))
    }

    /// Undo the last committed action. `None` when there is no history.
    pub fn undo(&mut self) -> Option<Frame> {
        let elements = self.canvas.undo()?;
        Some(self.full_log_frame(elements))
    }

    /// Redo the last undone action. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<Frame> {
        let elements = self.canvas.redo()?;
        Some(self.full_log_frame(elements))
    }

    /// Clear the canvas and emit the (empty) log.
    pub fn clear(&mut self) -> Frame {
        let elements = self.canvas.clear();
        self.full_log_frame(elements)
    }

    /// A chat line to send. The feed is only updated when the server's
    /// broadcast comes back.
    #[must_use]
    pub fn chat_frame(&self, text: impl Into<String>) -> Frame {
        Frame::new(
            protocol::CHAT_MESSAGE,
            &ChatSend {
                room_id: self.room_id.clone(),
                message: ChatBody { message: text.into() },
                user_id: Some(self.user.user_id),
            },
        )
    }

    fn full_log_frame(&self, elements: Vec<DrawingElement>) -> Frame {
        Frame::new(
            protocol::UPDATE_DRAWING,
            &ElementsPayload { room_id: self.room_id.clone(), elements },
        )
    }

    // =========================================================================
    // INBOUND
    // =========================================================================

    /// Apply one server frame to local state. Unknown events are ignored —
    /// an older client must keep working when the server learns new tricks.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidPayload`] when a known event carries a
    /// payload that does not decode; local state is left untouched.
    pub fn apply(&mut self, frame: &Frame) -> Result<(), CodecError> {
        match frame.event.as_str() {
            protocol::USER_IS_JOINED => {
                let ack: JoinAck = frame.payload()?;
                self.joined = ack.success;
            }
            protocol::UPDATE_USERS => {
                self.roster.users = frame.payload()?;
            }
            protocol::DRAW_ELEMENT => {
                self.canvas.apply_append(frame.payload()?);
            }
            protocol::UPDATE_ELEMENT => {
                self.canvas.apply_replace(frame.payload()?);
            }
            protocol::UPDATE_DRAWING => {
                self.canvas.apply_snapshot(frame.payload()?);
            }
            protocol::CHAT_MESSAGE => {
                let chat: ChatBroadcast = frame.payload()?;
                self.chat
                    .messages
                    .push(ChatMessage { user: chat.name, message: chat.message.message });
            }
            _ => {}
        }
        Ok(())
    }
}
