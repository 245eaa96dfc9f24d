//! # REST API for Enrollments
//!
//! Enroll/unenroll, payments, attendance toggling and status/grade patches.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{
    EnrollRequest, EnrollResponse, EnrollmentListResponse, EnrollmentResponse, PaymentRequest,
    PaymentResponse, ToggleAttendanceRequest, UpdateEnrollmentRequest,
};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::course_mapper::EnrollmentMapper;
use crate::backend::io::rest::mappers::parse_day;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_enrollments).post(enroll_student))
        .route(
            "/:id",
            axum::routing::put(update_enrollment).delete(unenroll),
        )
        .route("/:id/payments", post(record_payment))
        .route("/:id/attendance", post(toggle_attendance))
}

pub async fn list_enrollments(State(state): State<AppState>) -> impl IntoResponse {
    let enrollments = state
        .course_service
        .list_enrollments()
        .into_iter()
        .map(EnrollmentMapper::to_dto)
        .collect();
    Json(EnrollmentListResponse { enrollments })
}

/// Idempotent per (student, course) pair: existing pairs are echoed back in
/// `skipped_course_ids`, never duplicated.
pub async fn enroll_student(
    State(state): State<AppState>,
    Json(request): Json<EnrollRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/enrollments - student {} into {} courses",
        request.student_id,
        request.course_ids.len()
    );
    match state
        .course_service
        .enroll(EnrollmentMapper::to_enroll_command(request))
    {
        Ok(outcome) => {
            let created_count = outcome.created.len();
            (
                StatusCode::CREATED,
                Json(EnrollResponse {
                    created: outcome
                        .created
                        .into_iter()
                        .map(EnrollmentMapper::to_dto)
                        .collect(),
                    skipped_course_ids: outcome.skipped_course_ids,
                    success_message: format!("{} enrollments created", created_count),
                }),
            )
                .into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

pub async fn update_enrollment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateEnrollmentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/enrollments/{}", id);
    let patch = match EnrollmentMapper::to_patch(request) {
        Ok(patch) => patch,
        Err(e) => return domain_error_response(e),
    };
    match state.course_service.update_enrollment(&id, patch) {
        Ok(Some(enrollment)) => Json(EnrollmentResponse {
            enrollment: EnrollmentMapper::to_dto(enrollment),
            success_message: "Enrollment updated successfully".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn unenroll(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/enrollments/{}", id);
    match state.course_service.unenroll(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Signed delta; the service enforces the `[0, price_total]` bound.
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/enrollments/{}/payments - {}", id, request.amount);
    match state.course_service.record_payment(&id, request.amount) {
        Ok(Some(outcome)) => Json(PaymentResponse {
            id: outcome.enrollment.id.clone(),
            paid_amount: outcome.enrollment.paid_amount,
            remaining: outcome.remaining,
            success_message: "Payment recorded".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn toggle_attendance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ToggleAttendanceRequest>,
) -> impl IntoResponse {
    info!("POST /api/enrollments/{}/attendance - {}", id, request.date);
    let date = match parse_day(&request.date) {
        Ok(date) => date,
        Err(e) => return domain_error_response(e),
    };
    match state.course_service.toggle_attendance(&id, date) {
        Ok(Some(present)) => Json(serde_json::json!({ "date": request.date, "present": present }))
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
