use chat_core::observability::logging::init_tracing;
use chat_frontend::config::Settings;
use chat_frontend::startup::Application;
use dotenvy::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("chat-frontend", "info");

    let app = Application::build(settings)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to build application: {}", e))?;

    info!("Starting chat-frontend on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
