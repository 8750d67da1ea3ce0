//! Session state container and its two controller operation families.
//!
//! All mutation of the session, pending file, transcript, error slot and
//! busy flags goes through the operations here; handlers stay thin. Each
//! network-bound operation runs in two phases: a synchronous phase under the
//! lock (validate, mutate, set the busy flag), then the engine call with the
//! lock released, then a final phase under the lock (apply result, clear the
//! flag). The busy flags guarantee at most one outstanding operation of each
//! kind, so the unlocked await window cannot interleave two orchestrations.

use crate::models::{DocumentSession, Message, PendingFile, Transcript};
use crate::services::engine_client::{EngineClient, ProcessResponse, QueryResponse};
use chat_core::error::AppError;
use serde::Serialize;
use tokio::sync::Mutex;

const INVALID_FILE_TYPE_MESSAGE: &str = "Please upload a PDF file";

#[derive(Debug, Default)]
struct Inner {
    session: Option<DocumentSession>,
    transcript: Transcript,
    pending: Option<PendingFile>,
    error: Option<String>,
    uploading: bool,
    querying: bool,
}

/// Shared chat state. `NoSession --upload success--> HasSession`; a later
/// successful upload re-enters `HasSession` with a new hash and a reset
/// transcript. There is no transition back to `NoSession`.
#[derive(Debug, Default)]
pub struct ChatState {
    inner: Mutex<Inner>,
}

/// Read-only view of the state container, for the session endpoint.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub session: Option<DocumentSession>,
    pub pending: Option<PendingFileView>,
    pub error: Option<String>,
    pub uploading: bool,
    pub querying: bool,
}

/// Pending file metadata without the raw bytes.
#[derive(Debug, Serialize)]
pub struct PendingFileView {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl From<&PendingFile> for PendingFileView {
    fn from(file: &PendingFile) -> Self {
        Self {
            name: file.name.clone(),
            size_bytes: file.size_bytes,
            mime_type: file.mime_type.clone(),
        }
    }
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a candidate file, accepting only `application/pdf`.
    ///
    /// A rejected selection sets the error slot and leaves any previously
    /// selected valid file untouched; repeated invalid selections only ever
    /// overwrite the error.
    pub async fn select_file(&self, candidate: PendingFile) -> Result<PendingFileView, AppError> {
        let mut state = self.inner.lock().await;
        if !candidate.is_pdf() {
            tracing::warn!(
                mime_type = %candidate.mime_type,
                file_name = %candidate.name,
                "Rejected non-PDF selection"
            );
            state.error = Some(INVALID_FILE_TYPE_MESSAGE.to_string());
            return Err(AppError::InvalidFileType(
                INVALID_FILE_TYPE_MESSAGE.to_string(),
            ));
        }
        state.error = None;
        let view = PendingFileView::from(&candidate);
        state.pending = Some(candidate);
        Ok(view)
    }

    /// Discard the pending file. No-op if none is selected.
    pub async fn clear_selection(&self) {
        let mut state = self.inner.lock().await;
        state.pending = None;
    }

    /// Send the pending file to the engine and establish a new session.
    ///
    /// On success the transcript is reset to a single assistant greeting
    /// naming the page count. On failure the pending file and any prior
    /// session survive for a fresh user-initiated attempt.
    pub async fn upload(&self, engine: &EngineClient) -> Result<ProcessResponse, AppError> {
        let (name, mime_type, data) = {
            let mut state = self.inner.lock().await;
            if state.uploading {
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "An upload is already in progress"
                )));
            }
            let pending = state.pending.as_ref().ok_or_else(|| {
                AppError::BadRequest(anyhow::anyhow!("No file selected for upload"))
            })?;
            let parts = (
                pending.name.clone(),
                pending.mime_type.clone(),
                pending.data.clone(),
            );
            state.uploading = true;
            state.error = None;
            parts
        };

        let result = engine.process(&name, &mime_type, data).await;

        let mut state = self.inner.lock().await;
        state.uploading = false;
        match result {
            Ok(response) => {
                state.session = Some(DocumentSession {
                    hash: response.hash.clone(),
                    total_pages: response.total_pages,
                });
                state.transcript = Transcript::seeded(Message::assistant(format!(
                    "PDF uploaded successfully! I've processed {} pages. \
                     You can now ask me questions about the document.",
                    response.total_pages
                )));
                state.pending = None;
                tracing::info!(hash = %response.hash, total_pages = response.total_pages, "Document session established");
                Ok(response)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Run one question/answer round-trip against the active session.
    ///
    /// The user message is appended optimistically before the engine call;
    /// a failed answer does not erase the fact that the question was asked.
    pub async fn submit(
        &self,
        engine: &EngineClient,
        question: &str,
    ) -> Result<QueryResponse, AppError> {
        let (hash, trimmed) = {
            let mut state = self.inner.lock().await;
            if state.querying {
                return Err(AppError::Conflict(anyhow::anyhow!(
                    "A question is already being answered"
                )));
            }
            let hash = state
                .session
                .as_ref()
                .map(|session| session.hash.clone())
                .ok_or_else(|| {
                    AppError::BadRequest(anyhow::anyhow!("No document has been uploaded yet"))
                })?;
            let trimmed = question.trim();
            if trimmed.is_empty() {
                return Err(AppError::BadRequest(anyhow::anyhow!(
                    "Query must not be empty"
                )));
            }
            state.querying = true;
            state.error = None;
            state.transcript.push(Message::user(trimmed));
            (hash, trimmed.to_string())
        };

        let result = engine.query(&hash, &trimmed).await;

        let mut state = self.inner.lock().await;
        state.querying = false;
        match result {
            Ok(response) => {
                state.transcript.push(Message::assistant(format!(
                    "{}\n\n**Keywords**: {}",
                    response.answer, response.keywords
                )));
                Ok(response)
            }
            Err(err) => {
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn view(&self) -> StateView {
        let state = self.inner.lock().await;
        StateView {
            session: state.session.clone(),
            pending: state.pending.as_ref().map(PendingFileView::from),
            error: state.error.clone(),
            uploading: state.uploading,
            querying: state.querying,
        }
    }

    pub async fn messages(&self) -> Vec<Message> {
        let state = self.inner.lock().await;
        state.transcript.messages().to_vec()
    }
}
