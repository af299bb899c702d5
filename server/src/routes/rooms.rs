//! Room REST surface.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::services::room::{self, RoomError};
use crate::state::AppState;

/// `GET /` — liveness string.
pub async fn index() -> &'static str {
    "SyncArt server is running"
}

/// `GET /rooms/:room_id/users` — current member list, or 404 for a room id
/// the server has never seen. Reads are the only place `NotFound` surfaces;
/// write events on unknown rooms are silently dropped by the session layer.
pub async fn list_room_users(
    State(state): State<AppState>,
    Path(room_id): Path<String>,
) -> Response {
    match room::member_list(&state, &room_id).await {
        Ok(users) => Json(users).into_response(),
        Err(RoomError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Room not found" })),
        )
            .into_response(),
    }
}

#[cfg(test)]
#[path = "rooms_test.rs"]
mod tests;
