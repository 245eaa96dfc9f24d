//! # REST API for the Workspace
//!
//! Walk-in check-ins/check-outs and the per-day session listing.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use serde::Deserialize;
use shared::{CheckInRequest, CheckOutResponse, SessionResponse, WorkspaceDayResponse};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::activity_mapper::WorkspaceMapper;
use crate::backend::io::rest::mappers::parse_optional_day;
use crate::backend::storage::Store;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_day))
        .route("/check-in", post(check_in))
        .route("/:id/check-out", post(check_out))
        .route("/:id", axum::routing::delete(delete_session))
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    /// ISO date; defaults to today.
    pub date: Option<String>,
}

pub async fn list_day(
    State(state): State<AppState>,
    Query(query): Query<DayQuery>,
) -> impl IntoResponse {
    let date = match parse_optional_day(query.date.as_deref()) {
        Ok(date) => date.unwrap_or_else(|| Store::now().date_naive()),
        Err(e) => return domain_error_response(e),
    };
    let day = state.workspace_service.list_day(date);
    Json(WorkspaceDayResponse {
        date: day.date.format("%Y-%m-%d").to_string(),
        sessions: day
            .sessions
            .into_iter()
            .map(WorkspaceMapper::to_dto)
            .collect(),
        day_total: day.day_total,
    })
    .into_response()
}

pub async fn check_in(
    State(state): State<AppState>,
    Json(request): Json<CheckInRequest>,
) -> impl IntoResponse {
    info!("POST /api/workspace/check-in - {}", request.person_name);
    let command = match WorkspaceMapper::to_check_in_command(request) {
        Ok(command) => command,
        Err(e) => return domain_error_response(e),
    };
    match state.workspace_service.check_in(command) {
        Ok(session) => (
            StatusCode::CREATED,
            Json(SessionResponse {
                session: WorkspaceMapper::to_dto(session),
                success_message: "Checked in".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/workspace/{}/check-out", id);
    match state.workspace_service.check_out(&id) {
        Ok(Some(outcome)) => Json(CheckOutResponse {
            session: WorkspaceMapper::to_dto(outcome.session),
            cost: outcome.cost,
            success_message: "Checked out".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/workspace/{}", id);
    match state.workspace_service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
