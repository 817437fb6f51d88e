// HTTP request handlers
use crate::infrastructure::http_response::{chart_payload_response, csv_attachment_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::render_dashboard;
use axum::{
    extract::{rejection::FormRejection, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct RefreshForm {
    pub id: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Dashboard page with every chart
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    match state.dashboard_service.all_chart_payloads().await {
        Ok(payloads) => Html(render_dashboard(&payloads)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// CSV download, selected by which `download<id>` button was submitted.
/// Anything else goes back to the page.
pub async fn download(
    State(state): State<Arc<AppState>>,
    form: Result<Form<HashMap<String, String>>, FormRejection>,
) -> Response {
    let fields = match form {
        Ok(Form(fields)) => fields,
        Err(e) => {
            tracing::debug!("Unreadable download form: {}", e);
            return Redirect::to("/").into_response();
        }
    };

    let service = &state.dashboard_service;
    let Some(sensor) = service.catalog().by_download_field(fields.keys().map(String::as_str)) else {
        tracing::debug!("No download field in form, redirecting");
        return Redirect::to("/").into_response();
    };

    match service.export_csv(sensor).await {
        Ok(export) => match csv_attachment_response(export) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

/// Chart payload for a single sensor
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    form: Result<Form<RefreshForm>, FormRejection>,
) -> Response {
    let service = &state.dashboard_service;
    let sensor = form
        .ok()
        .and_then(|Form(form)| form.id)
        .and_then(|id| service.catalog().by_id(&id));

    let Some(sensor) = sensor else {
        tracing::debug!("Missing or unknown refresh id, redirecting");
        return Redirect::to("/").into_response();
    };

    match service.chart_payload(sensor).await {
        Ok(json) => match chart_payload_response(json) {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => e.into_response(),
    }
}

pub async fn refresh_redirect() -> Redirect {
    Redirect::to("/")
}
