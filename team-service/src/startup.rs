//! Application startup and lifecycle management.

use crate::config::{StoreBackend, TeamConfig};
use crate::handlers;
use crate::services::{InMemoryTeamStore, TeamDb, TeamStore};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{
    function_key_middleware, metrics_middleware, request_id_middleware,
    security_headers_middleware, FunctionKeyConfig,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: TeamConfig,
    pub store: Arc<dyn TeamStore>,
}

impl AppState {
    pub fn new(config: TeamConfig, store: Arc<dyn TeamStore>) -> Self {
        Self { config, store }
    }
}

/// Build the HTTP router: team CRUD behind the function-key gate, plus health and
/// metrics endpoints.
pub fn build_router(state: AppState) -> Router {
    let function_key = FunctionKeyConfig::new(state.config.function_key.clone());

    let team_routes = Router::new()
        .route(
            "/teams",
            get(handlers::list_teams).post(handlers::create_team),
        )
        .route(
            "/teams/:id",
            get(handlers::get_team)
                .put(handlers::update_team)
                .delete(handlers::delete_team),
        )
        .route_layer(middleware::from_fn_with_state(
            function_key,
            function_key_middleware,
        ));

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .merge(team_routes)
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: TeamConfig) -> Result<Self, AppError> {
        let store: Arc<dyn TeamStore> = match config.store {
            StoreBackend::Mongo => Arc::new(
                TeamDb::connect(
                    &config.mongodb.uri,
                    &config.mongodb.database,
                    &config.mongodb.collection,
                )
                .await
                .map_err(|e| {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    e
                })?,
            ),
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory team store; data is lost on restart");
                Arc::new(InMemoryTeamStore::new())
            }
        };

        if config.function_key.is_none() {
            tracing::warn!("FUNCTION_KEY not set; team routes are not gated");
        }

        let state = AppState::new(config.clone(), store);

        // Port 0 binds a random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Team service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn TeamStore> {
        self.state.store.clone()
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
