// Per-request PostgreSQL connections
use crate::application::error::DashboardError;
use crate::infrastructure::config::{load_postgres_settings, PostgresSettings};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens a fresh connection for every call. Credentials are re-read from the
/// environment each time; nothing is pooled or reused.
#[derive(Debug, Clone, Default)]
pub struct ConnectionProvider;

impl ConnectionProvider {
    pub fn new() -> Self {
        Self
    }

    pub async fn open(&self) -> Result<ConnectionHandle, DashboardError> {
        let settings = load_postgres_settings()?;
        Self::connect(&settings).await
    }

    async fn connect(settings: &PostgresSettings) -> Result<ConnectionHandle, DashboardError> {
        let mut config = tokio_postgres::Config::new();
        config
            .host(settings.host.as_str())
            .port(settings.port_number()?)
            .dbname(settings.db.as_str())
            .user(settings.user.as_str())
            .password(settings.password.as_str())
            .connect_timeout(CONNECT_TIMEOUT);

        let (client, connection) = config
            .connect(NoTls)
            .await
            .map_err(|e| DashboardError::Connection(e.to_string()))?;

        // The connection object drives the socket; it resolves once every
        // client handle has been dropped.
        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::warn!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::debug!("Opened connection to {}:{}/{}", settings.host, settings.port, settings.db);
        Ok(ConnectionHandle { client, driver })
    }
}

/// An open connection. Dropping the handle on any path closes the session;
/// `close` additionally waits for the driver task to finish.
pub struct ConnectionHandle {
    client: Client,
    driver: JoinHandle<()>,
}

impl ConnectionHandle {
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn close(self) {
        let Self { client, driver } = self;
        drop(client);
        if let Err(e) = driver.await {
            tracing::warn!("PostgreSQL connection task failed: {}", e);
        }
        tracing::debug!("Closed PostgreSQL connection");
    }
}
