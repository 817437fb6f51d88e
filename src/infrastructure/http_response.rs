// HTTP response utilities for CSV downloads, chart payloads and errors
use crate::application::dashboard_service::CsvExport;
use crate::application::error::DashboardError;
use axum::{
    body::Body,
    http::{header, HeaderValue, Response, StatusCode},
    response::IntoResponse,
};

/// CSV file served as an attachment
pub fn csv_attachment_response(export: CsvExport) -> Result<Response<Body>, StatusCode> {
    let disposition = format!("attachment; filename={}", export.filename);

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/csv")
        .header(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition).map_err(|e| {
                tracing::error!("Invalid Content-Disposition {:?}: {}", disposition, e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?,
        )
        .body(Body::from(export.content))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Serialized chart payload
pub fn chart_payload_response(json: String) -> Result<Response<Body>, StatusCode> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json))
        .map_err(|e| {
            tracing::error!("Response build error: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing text; store and configuration details stay in the log
    pub fn public_message(&self) -> &'static str {
        match self {
            DashboardError::NotFound(_) => "Sensor table not found",
            DashboardError::Connection(_) => "Database unavailable",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        (status, self.public_message()).into_response()
    }
}
