// Dashboard service - Use cases for chart payloads and CSV downloads
use crate::application::error::{DashboardError, DashboardResult};
use crate::application::series_repository::SeriesRepository;
use crate::domain::chart::ChartDescription;
use crate::domain::sensor::{SensorCatalog, SensorTable};
use crate::infrastructure::chart_payload::serialize_chart;
use futures::future::try_join_all;
use std::sync::Arc;

/// A rendered CSV download
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
}

/// Serialized chart for one catalog entry
#[derive(Debug, Clone)]
pub struct ChartPayload {
    pub sensor: SensorTable,
    pub json: String,
}

#[derive(Clone)]
pub struct DashboardService {
    repository: Arc<dyn SeriesRepository>,
    catalog: Arc<SensorCatalog>,
}

impl DashboardService {
    pub fn new(repository: Arc<dyn SeriesRepository>, catalog: Arc<SensorCatalog>) -> Self {
        Self {
            repository,
            catalog,
        }
    }

    pub fn catalog(&self) -> &SensorCatalog {
        &self.catalog
    }

    pub async fn chart(&self, sensor: &SensorTable) -> DashboardResult<ChartDescription> {
        let series = self.repository.fetch_series(sensor).await?;
        tracing::debug!("Building chart for {} from {} points", sensor.table, series.len());

        Ok(ChartDescription::build(
            &series,
            sensor.title,
            sensor.y_axis_title,
            sensor.color,
        ))
    }

    pub async fn chart_payload(&self, sensor: &SensorTable) -> DashboardResult<String> {
        let chart = self.chart(sensor).await?;
        serialize_chart(&chart)
    }

    /// Payloads for every catalog entry, in catalog order. Each fetch uses its
    /// own connection; the first failure fails the whole page.
    pub async fn all_chart_payloads(&self) -> DashboardResult<Vec<ChartPayload>> {
        let requests = self.catalog.sensors().iter().map(|sensor| async move {
            let json = self.chart_payload(sensor).await?;
            Ok::<_, DashboardError>(ChartPayload {
                sensor: sensor.clone(),
                json,
            })
        });

        try_join_all(requests).await
    }

    pub async fn export_csv(&self, sensor: &SensorTable) -> DashboardResult<CsvExport> {
        let series = self.repository.fetch_series(sensor).await?;
        if series.is_empty() {
            tracing::debug!("{} has no rows, exporting header only", sensor.table);
        } else {
            tracing::debug!("Exporting {} rows from {}", series.len(), sensor.table);
        }

        Ok(CsvExport {
            filename: format!("{}.csv", sensor.filename),
            content: series.to_csv(),
        })
    }
}
