//! # REST API for Students
//!
//! Roster CRUD plus the bulk CSV upload and the per-student balance view.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{
    CreateStudentRequest, ImportStudentsResponse, StudentEnrollmentsResponse, StudentListResponse,
    StudentResponse, SubscriptionListResponse, UpdateStudentRequest,
};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::activity_mapper::SubscriptionMapper;
use crate::backend::io::rest::mappers::course_mapper::{CourseMapper, EnrollmentMapper};
use crate::backend::io::rest::mappers::metrics_mapper::MetricsMapper;
use crate::backend::io::rest::mappers::people_mapper::StudentMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/import", post(import_students))
        .route(
            "/:id",
            axum::routing::put(update_student).delete(delete_student),
        )
        .route("/:id/balance", get(student_balance))
        .route("/:id/enrollments", get(student_enrollments))
        .route("/:id/subscriptions", get(student_subscriptions))
}

pub async fn list_students(State(state): State<AppState>) -> impl IntoResponse {
    let students = state
        .student_service
        .list()
        .into_iter()
        .map(StudentMapper::to_dto)
        .collect();
    Json(StudentListResponse { students })
}

pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> impl IntoResponse {
    info!("POST /api/students - {}", request.name);
    match state
        .student_service
        .add(StudentMapper::to_create_command(request))
    {
        Ok(student) => (
            StatusCode::CREATED,
            Json(StudentResponse {
                student: StudentMapper::to_dto(student),
                success_message: "Student added successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Bulk upload: CSV body with a header row; rows with a blank name are
/// dropped, everything else is appended.
pub async fn import_students(State(state): State<AppState>, body: String) -> impl IntoResponse {
    info!("POST /api/students/import - {} bytes", body.len());
    match state
        .backup_service
        .import_students_csv(&body, &state.student_service)
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(ImportStudentsResponse {
                imported_count: result.imported_count,
                skipped_count: result.skipped_count,
                success_message: format!("{} students imported", result.imported_count),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStudentRequest>,
) -> impl IntoResponse {
    info!("PUT /api/students/{}", id);
    match state
        .student_service
        .update(&id, StudentMapper::to_patch(request))
    {
        Ok(Some(student)) => Json(StudentResponse {
            student: StudentMapper::to_dto(student),
            success_message: "Student updated successfully".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Cascades: the student's enrollments and subscriptions go with it.
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/students/{}", id);
    match state.student_service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn student_balance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let balance = state.metrics_service.student_balance(&id);
    let currency = state.settings_service.get().currency;
    Json(MetricsMapper::balance_to_dto(&id, balance, &currency))
}

/// The student's enrollments joined with their courses, as the detail view
/// renders them.
pub async fn student_enrollments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let items = state
        .course_service
        .enrollments_for_student(&id)
        .into_iter()
        .map(|item| shared::EnrollmentWithCourse {
            enrollment: EnrollmentMapper::to_dto(item.enrollment),
            course: item.course.map(CourseMapper::to_dto),
        })
        .collect();
    Json(StudentEnrollmentsResponse { items })
}

pub async fn student_subscriptions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let subscriptions = state
        .subscription_service
        .list_for_student(&id)
        .into_iter()
        .map(SubscriptionMapper::to_dto)
        .collect();
    Json(SubscriptionListResponse { subscriptions })
}
