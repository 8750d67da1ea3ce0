//! HTTP client for the external document-processing/answering engine.
//!
//! The engine exposes two operations: `POST /process` (multipart upload,
//! returns the document hash and page count) and `POST /query` (JSON,
//! returns the answer and extracted keywords). Non-2xx responses are
//! treated as opaque failures; the body is logged, not parsed. Every
//! request runs under the configured timeout, and a timeout takes the same
//! failure path as any other transport error. No retries: a failed call is
//! retried only by a fresh user action.

use crate::config::EngineSettings;
use chat_core::error::AppError;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine response to a processed upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub message: String,
    pub hash: String,
    pub total_pages: u64,
}

/// Engine response to one question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub keywords: String,
    pub answer: String,
    pub total_results: u64,
}

#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    hash: &'a str,
    query: &'a str,
}

pub struct EngineClient {
    client: reqwest::Client,
    base_url: String,
}

impl EngineClient {
    pub fn new(settings: &EngineSettings) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Upload a file for processing. Returns the assigned hash and page count.
    pub async fn process(
        &self,
        file_name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<ProcessResponse, AppError> {
        let part = multipart::Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime_type)
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Invalid mime type {}: {}", mime_type, e))
            })?;
        let form = multipart::Form::new().part("file", part);

        tracing::debug!(file_name = %file_name, "Sending file to engine /process");

        let response = self
            .client
            .post(format!("{}/process", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Engine /process request failed");
                AppError::BadGateway(format!("Failed to upload file: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "Engine rejected /process");
            return Err(AppError::BadGateway(format!(
                "Failed to upload file (engine returned {})",
                status
            )));
        }

        response.json().await.map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Malformed /process response: {}", e))
        })
    }

    /// Ask one question against a processed document.
    pub async fn query(&self, hash: &str, query: &str) -> Result<QueryResponse, AppError> {
        tracing::debug!(hash = %hash, query_len = query.len(), "Sending question to engine /query");

        let response = self
            .client
            .post(format!("{}/query", self.base_url))
            .json(&QueryRequest { hash, query })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Engine /query request failed");
                AppError::BadGateway(format!("Failed to query: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(%status, "Engine rejected /query");
            return Err(AppError::BadGateway(format!(
                "Failed to query (engine returned {})",
                status
            )));
        }

        response.json().await.map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("Malformed /query response: {}", e))
        })
    }
}
