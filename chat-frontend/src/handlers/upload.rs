use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use chat_core::error::AppError;

/// Upload the pending file to the engine and establish the session.
pub async fn upload(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let response = state.chat.upload(&state.engine).await?;
    Ok(Json(response))
}
