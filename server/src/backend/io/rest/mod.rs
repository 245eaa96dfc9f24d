//! # REST API Interface Layer
//!
//! HTTP endpoints for the training-center backend: request/response
//! serialization, translation of domain errors to status codes, and request
//! logging. A pure translation layer: no business logic lives here.
//!
//! Error mapping:
//! - `Validation` and `Parse` -> 400 with the message as the body
//! - `Storage` -> 500 with a generic body (details go to the log)
//! - unknown-id no-ops -> 204 No Content (the lenient store contract)

pub mod auth_apis;
pub mod backup_apis;
pub mod course_apis;
pub mod enrollment_apis;
pub mod expense_apis;
pub mod mappers;
pub mod mentor_apis;
pub mod metrics_apis;
pub mod settings_apis;
pub mod student_apis;
pub mod subscription_apis;
pub mod workspace_apis;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::backend::domain::error::DomainError;

/// Translate a domain error into an HTTP response.
pub(crate) fn domain_error_response(error: DomainError) -> Response {
    match error {
        DomainError::Validation(message) => (StatusCode::BAD_REQUEST, message).into_response(),
        DomainError::Parse(message) => {
            (StatusCode::BAD_REQUEST, format!("parse error: {}", message)).into_response()
        }
        DomainError::Storage(cause) => {
            error!("storage failure: {:#}", cause);
            (StatusCode::INTERNAL_SERVER_ERROR, "internal storage error").into_response()
        }
    }
}
