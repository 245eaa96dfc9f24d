//! # REST API for Derived Metrics
//!
//! The dashboard aggregate and the date-filtered report. Both recompute
//! from the store on every request; nothing here is cached.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use serde::Deserialize;
use shared::ReportResponse;

use crate::backend::domain::commands::reports::DateRange;
use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::metrics_mapper::MetricsMapper;
use crate::backend::io::rest::mappers::parse_optional_day;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/report", get(report))
}

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    Json(MetricsMapper::dashboard_to_dto(
        state.metrics_service.dashboard(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// ISO date; omitting a bound leaves that side unconstrained.
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> impl IntoResponse {
    info!("GET /api/metrics/report - {:?}..{:?}", query.start, query.end);
    let range = match (
        parse_optional_day(query.start.as_deref()),
        parse_optional_day(query.end.as_deref()),
    ) {
        (Ok(start), Ok(end)) => DateRange { start, end },
        (Err(e), _) | (_, Err(e)) => return domain_error_response(e),
    };
    let summary = state.metrics_service.financial_summary(range);
    Json(ReportResponse {
        start: query.start,
        end: query.end,
        summary: MetricsMapper::summary_to_dto(summary),
    })
    .into_response()
}
