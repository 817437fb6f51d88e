// Configuration - Environment-driven settings for the store and the server
use crate::application::error::DashboardError;
use serde::Deserialize;
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "0.0.0.0:8888";

/// Store credentials, read from `POSTGRES_HOST`, `POSTGRES_PORT`,
/// `POSTGRES_DB`, `POSTGRES_USER` and `POSTGRES_PASSWORD`.
#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: String,
    pub db: String,
    pub user: String,
    pub password: String,
}

impl PostgresSettings {
    pub fn port_number(&self) -> Result<u16, DashboardError> {
        self.port.trim().parse().map_err(|_| {
            DashboardError::Configuration(format!("POSTGRES_PORT is not a valid port: {:?}", self.port))
        })
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl ServerSettings {
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.bind.parse()?)
    }
}

pub fn load_postgres_settings() -> Result<PostgresSettings, DashboardError> {
    postgres_settings_from(config::Environment::with_prefix("POSTGRES"))
}

fn postgres_settings_from(source: config::Environment) -> Result<PostgresSettings, DashboardError> {
    let settings = config::Config::builder()
        .add_source(source)
        .build()
        .map_err(|e| DashboardError::Configuration(e.to_string()))?;

    let postgres: PostgresSettings = settings
        .try_deserialize()
        .map_err(|e| DashboardError::Configuration(e.to_string()))?;
    postgres.port_number()?;

    Ok(postgres)
}

pub fn load_server_settings() -> anyhow::Result<ServerSettings> {
    server_settings_from(config::Environment::with_prefix("DASHBOARD"))
}

fn server_settings_from(source: config::Environment) -> anyhow::Result<ServerSettings> {
    let settings = config::Config::builder()
        .set_default("bind", DEFAULT_BIND)?
        .add_source(source)
        .build()?;

    Ok(settings.try_deserialize()?)
}
