use serde::Serialize;

/// The only mime type the upload controller accepts.
pub const PDF_MIME: &str = "application/pdf";

/// Binding between the conversation and one processed document.
///
/// The hash is assigned by the external engine, never generated locally.
/// Exactly one session is active at a time; it is replaced (not closed) by
/// the next successful upload.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSession {
    pub hash: String,
    pub total_pages: u64,
}

/// A user-selected candidate file awaiting upload.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size_bytes: data.len() as u64,
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}
