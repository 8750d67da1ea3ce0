use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chat_core::error::AppError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub query: String,
}

/// Run one question/answer round-trip against the active session.
pub async fn submit_query(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let response = state.chat.submit(&state.engine, &request.query).await?;
    Ok(Json(response))
}
