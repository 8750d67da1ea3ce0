use crate::models::{Message, Role};
use crate::render::{render_markdown, RenderedBlock};
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

/// One transcript message with its rendered display blocks.
#[derive(Debug, Serialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
    pub blocks: Vec<RenderedBlock>,
}

impl From<Message> for TranscriptEntry {
    fn from(message: Message) -> Self {
        let blocks = render_markdown(&message.content);
        Self {
            role: message.role,
            content: message.content,
            blocks,
        }
    }
}

/// Current session, pending file metadata, error slot and busy flags.
pub async fn session_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.chat.view().await)
}

/// The full transcript in append order, rendered for display.
pub async fn transcript(State(state): State<AppState>) -> impl IntoResponse {
    let entries: Vec<TranscriptEntry> = state
        .chat
        .messages()
        .await
        .into_iter()
        .map(TranscriptEntry::from)
        .collect();
    Json(entries)
}
