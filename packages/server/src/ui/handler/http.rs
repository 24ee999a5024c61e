//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::websocket::{HistoryEntryDto, PollStateDto},
    ui::state::AppState,
};

/// Debug endpoint to get the current session state (for testing purposes)
pub async fn debug_session_state(State(state): State<Arc<AppState>>) -> Json<PollStateDto> {
    let snapshot = state.get_session_state_usecase.execute().await;
    Json(PollStateDto::from(&snapshot))
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Closed polls, oldest first
pub async fn get_poll_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryEntryDto>> {
    let history = state.get_poll_history_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(history.iter().map(HistoryEntryDto::from).collect())
}
