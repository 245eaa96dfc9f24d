//! # REST API for Backup
//!
//! Whole-store export and import. The export body is the verbatim store
//! document; feeding it back to the import endpoint restores the store.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::{error, info};
use shared::ImportSnapshotResponse;

use crate::backend::io::rest::domain_error_response;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export_snapshot))
        .route("/import", post(import_snapshot))
}

pub async fn export_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/backup/export");
    match state.backup_service.export_snapshot() {
        Ok(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            document,
        )
            .into_response(),
        Err(e) => {
            error!("failed to export snapshot: {}", e);
            domain_error_response(e)
        }
    }
}

/// Whole-state replace; a malformed body leaves the store untouched and
/// answers 400 with the parse failure.
pub async fn import_snapshot(State(state): State<AppState>, body: String) -> impl IntoResponse {
    info!("POST /api/backup/import - {} bytes", body.len());
    match state.backup_service.import_snapshot(&body) {
        Ok(()) => Json(ImportSnapshotResponse {
            success_message: "Snapshot imported".to_string(),
        })
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}
