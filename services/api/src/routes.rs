use crate::infra::{price_batch, price_occurrence, AppState, PricedOccurrence};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use recovery_ops::error::AppError;
use recovery_ops::workflows::compensation::{
    CompensationEngine, CompensationReportSummary, RateTable,
};
use recovery_ops::workflows::occurrences::{OccurrenceCsvImporter, OccurrenceRecord};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct CompensationReportRequest {
    #[serde(default)]
    pub(crate) occurrences: Vec<OccurrenceRecord>,
    /// Spreadsheet export priced after the inline occurrences.
    #[serde(default)]
    pub(crate) csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CompensationReportResponse {
    pub(crate) summary: CompensationReportSummary,
    pub(crate) occurrences: Vec<PricedOccurrence>,
}

pub(crate) fn with_compensation_routes(engine: Arc<CompensationEngine>) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/compensation/breakdown", post(breakdown_endpoint))
        .route("/api/v1/compensation/report", post(report_endpoint))
        .route("/api/v1/compensation/rate-table", get(rate_table_endpoint))
        .layer(Extension(engine))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn breakdown_endpoint(
    Extension(engine): Extension<Arc<CompensationEngine>>,
    Json(record): Json<OccurrenceRecord>,
) -> Json<PricedOccurrence> {
    Json(price_occurrence(&engine, record))
}

pub(crate) async fn report_endpoint(
    Extension(engine): Extension<Arc<CompensationEngine>>,
    Json(payload): Json<CompensationReportRequest>,
) -> Result<Json<CompensationReportResponse>, AppError> {
    let CompensationReportRequest {
        mut occurrences,
        csv,
    } = payload;

    if let Some(csv) = csv {
        let imported = OccurrenceCsvImporter::from_reader(Cursor::new(csv.into_bytes()))?;
        occurrences.extend(imported);
    }

    let (rows, report) = price_batch(&engine, occurrences);
    let summary = report.summary();
    info!(
        occurrences = summary.occurrences,
        total = %summary.totals.total,
        "compensation report built"
    );

    Ok(Json(CompensationReportResponse {
        summary,
        occurrences: rows,
    }))
}

pub(crate) async fn rate_table_endpoint(
    Extension(engine): Extension<Arc<CompensationEngine>>,
) -> Json<RateTable> {
    Json(engine.table().clone())
}
