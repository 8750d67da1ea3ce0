use chat_core::config::{self as core_config, get_env};
use chat_core::error::AppError;
use std::env;

#[derive(Debug, Clone)]
pub struct Settings {
    pub common: core_config::Config,
    pub engine: EngineSettings,
}

/// Settings for the external document-processing/answering engine.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Base URL of the engine, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-request timeout. A request that outlives this takes the normal
    /// failure path instead of leaving the orchestration in flight forever.
    pub timeout_secs: u64,
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        // Common config handles .env and the APP__ prefix.
        let common = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(Settings {
            common,
            engine: EngineSettings {
                base_url: get_env("ENGINE_URL", Some("http://localhost:8000"), is_prod)?,
                timeout_secs: get_env("ENGINE_TIMEOUT_SECS", Some("30"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "Invalid ENGINE_TIMEOUT_SECS: {}",
                            e
                        ))
                    })?,
            },
        })
    }
}
