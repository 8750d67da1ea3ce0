use crate::models::PendingFile;
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chat_core::error::AppError;

/// Select a candidate file. Drag-and-drop and the file picker both land
/// here; a single multipart `file` field carries the candidate.
pub async fn select_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| {
            AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
        })?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No file provided")))?;

    let file_name = field.file_name().unwrap_or("unnamed").to_string();
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read file bytes: {}", e)))?
        .to_vec();

    let view = state
        .chat
        .select_file(PendingFile::new(file_name, mime_type, data))
        .await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Discard the pending file, if any.
pub async fn clear_selection(State(state): State<AppState>) -> StatusCode {
    state.chat.clear_selection().await;
    StatusCode::NO_CONTENT
}
