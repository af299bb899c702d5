use super::*;
use axum::body::to_bytes;
use tokio::sync::mpsc;
use uuid::Uuid;

#[tokio::test]
async fn index_reports_liveness() {
    assert_eq!(index().await, "SyncArt server is running");
}

#[tokio::test]
async fn known_room_returns_member_list() {
    let state = AppState::new();
    let user_id = Uuid::new_v4();
    let (tx, _rx) = mpsc::channel(8);
    room::add_member(&state, "r1", user_id, "Alice", tx).await;

    let response = list_room_users(State(state), Path("r1".to_owned())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let users: Vec<protocol::User> = serde_json::from_slice(&body).expect("json body");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_id, user_id);
    assert_eq!(users[0].name, "Alice");
}

#[tokio::test]
async fn unknown_room_returns_404_with_json_message() {
    let state = AppState::new();

    let response = list_room_users(State(state), Path("ghost".to_owned())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value: serde_json::Value = serde_json::from_slice(&body).expect("json body");
    assert_eq!(value.get("message").and_then(|v| v.as_str()), Some("Room not found"));
}

#[tokio::test]
async fn emptied_room_still_lists_rather_than_404() {
    let state = AppState::new();
    let user_id = Uuid::new_v4();
    let (tx, _rx) = mpsc::channel(8);
    room::add_member(&state, "r1", user_id, "Alice", tx).await;
    room::remove_member(&state, "r1", user_id).await;

    let response = list_room_users(State(state), Path("r1".to_owned())).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let users: Vec<protocol::User> = serde_json::from_slice(&body).expect("json body");
    assert!(users.is_empty());
}
