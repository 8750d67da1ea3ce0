//! chat-core: Shared infrastructure for the pdf-chat workspace.
pub mod config;
pub mod error;
pub mod observability;

pub use axum;
pub use serde;
pub use tracing;
