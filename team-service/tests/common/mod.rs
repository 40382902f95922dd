use std::sync::Arc;
use team_service::config::TeamConfig;
use team_service::services::TeamStore;
use team_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: Arc<dyn TeamStore>,
}

impl TestApp {
    /// Spawn the service on a random port with the given configuration.
    pub async fn spawn_with(config: TeamConfig) -> Self {
        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
        }
    }

    /// Spawn the service backed by the in-memory store.
    pub async fn spawn() -> Self {
        Self::spawn_with(TeamConfig::in_memory()).await
    }

    pub fn teams_url(&self) -> String {
        format!("{}/teams", self.address)
    }

    pub fn team_url(&self, id: &str) -> String {
        format!("{}/teams/{}", self.address, id)
    }
}
