use crate::error::AppError;
use config::{Config as Cfg, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Plain environment variables honoured when the matching `APP__*` key is unset.
const ENV_FALLBACKS: [(&str, &str); 2] = [
    ("LOG_LEVEL", "log_level"),
    ("OTLP_ENDPOINT", "otlp_endpoint"),
];

/// Settings shared by every service: loaded from `.env`, an optional `configuration`
/// file and `APP__*` environment variables, with `LOG_LEVEL` and `OTLP_ENDPOINT` as
/// lowest-priority fallbacks.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from an explicit set of environment variables.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, AppError> {
        let mut builder = Cfg::builder();
        for (var, key) in ENV_FALLBACKS {
            if let Some(value) = vars.get(var).filter(|v| !v.is_empty()) {
                builder = builder.set_default(key, value.as_str())?;
            }
        }

        let config = builder
            .add_source(File::with_name("configuration").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .source(Some(vars)),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}
