use service_core::observability::init_tracing;
use team_service::config::TeamConfig;
use team_service::services::init_metrics;
use team_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = TeamConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "team-service",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    init_metrics();

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
