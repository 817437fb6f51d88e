// Error taxonomy for the dashboard use cases
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// A store credential is missing or malformed
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("could not connect to the database: {0}")]
    Connection(String),

    #[error("table not found: {0}")]
    NotFound(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("could not serialize chart: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type DashboardResult<T> = Result<T, DashboardError>;
