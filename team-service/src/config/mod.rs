use secrecy::Secret;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Database shared by the teams, coaches and players services.
pub const DATABASE_NAME: &str = "teams_coaches_players_db";
pub const COLLECTION_NAME: &str = "Teams";

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub store: StoreBackend,
    /// Shared secret required on the team routes when set.
    pub function_key: Option<Secret<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub collection: String,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Mongo,
    Memory,
}

impl TeamConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let store: StoreBackend = get_env("TEAM_STORE_BACKEND", Some("mongo"), false)?
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let uri = match store {
            StoreBackend::Mongo => get_env("MONGO_CONNECTION_STRING", None, is_prod)?,
            StoreBackend::Memory => env::var("MONGO_CONNECTION_STRING").unwrap_or_default(),
        };

        Ok(TeamConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri,
                database: DATABASE_NAME.to_string(),
                collection: COLLECTION_NAME.to_string(),
            },
            store,
            function_key: env::var("FUNCTION_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .map(Secret::new),
        })
    }

    /// Configuration for an in-process store, listening on a random port.
    pub fn in_memory() -> Self {
        TeamConfig {
            common: core_config::Config {
                port: 0,
                ..core_config::Config::default()
            },
            mongodb: MongoConfig {
                uri: String::new(),
                database: DATABASE_NAME.to_string(),
                collection: COLLECTION_NAME.to_string(),
            },
            store: StoreBackend::Memory,
            function_key: None,
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid team store backend: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
