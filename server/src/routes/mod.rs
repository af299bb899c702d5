//! Router assembly.
//!
//! The whole HTTP surface is small: a liveness string at `/`, the room
//! member-list read endpoint, and the websocket upgrade. CORS is wide open
//! because the whiteboard frontend is served from a separate origin.

pub mod rooms;
pub mod ws;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(rooms::index))
        .route("/rooms/{room_id}/users", get(rooms::list_room_users))
        .route("/ws", get(ws::handle_ws))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
