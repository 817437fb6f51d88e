// Repository trait for sensor series access
use crate::application::error::DashboardResult;
use crate::domain::sensor::SensorTable;
use crate::domain::series::Series;
use async_trait::async_trait;

#[async_trait]
pub trait SeriesRepository: Send + Sync {
    /// Fetch every `(time, value)` row of the sensor's table, ordered by time.
    /// Fails with `NotFound` when the table does not exist.
    async fn fetch_series(&self, sensor: &SensorTable) -> DashboardResult<Series>;
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use crate::application::error::DashboardError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory repository keyed by physical table name
    #[derive(Default)]
    pub struct InMemoryRepository {
        tables: HashMap<String, Series>,
        fetched: Mutex<Vec<String>>,
    }

    impl InMemoryRepository {
        pub fn with_table(mut self, table: &str, series: Series) -> Self {
            self.tables.insert(table.to_string(), series);
            self
        }

        pub fn fetched_tables(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SeriesRepository for InMemoryRepository {
        async fn fetch_series(&self, sensor: &SensorTable) -> DashboardResult<Series> {
            self.fetched.lock().unwrap().push(sensor.table.to_string());
            self.tables
                .get(sensor.table)
                .cloned()
                .ok_or_else(|| DashboardError::NotFound(sensor.table.to_string()))
        }
    }
}
