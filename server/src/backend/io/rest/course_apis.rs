//! # REST API for Courses
//!
//! Catalogue CRUD, per-course enrollment listing and the attendance-grid
//! CSV download.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{CourseListResponse, CourseResponse, CreateCourseRequest, EnrollmentListResponse, UpdateCourseRequest};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::course_mapper::{CourseMapper, EnrollmentMapper};
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            axum::routing::put(update_course).delete(delete_course),
        )
        .route("/:id/enrollments", get(course_enrollments))
        .route("/:id/attendance.csv", get(course_attendance_csv))
}

pub async fn list_courses(State(state): State<AppState>) -> impl IntoResponse {
    let courses = state
        .course_service
        .list_courses()
        .into_iter()
        .map(CourseMapper::to_dto)
        .collect();
    Json(CourseListResponse { courses })
}

pub async fn create_course(
    State(state): State<AppState>,
    Json(request): Json<CreateCourseRequest>,
) -> impl IntoResponse {
    info!("POST /api/courses - {}", request.title);
    match state
        .course_service
        .add_course(CourseMapper::to_create_command(request))
    {
        Ok(course) => (
            StatusCode::CREATED,
            Json(CourseResponse {
                course: CourseMapper::to_dto(course),
                success_message: "Course added successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCourseRequest>,
) -> impl IntoResponse {
    info!("PUT /api/courses/{}", id);
    match state
        .course_service
        .update_course(&id, CourseMapper::to_patch(request))
    {
        Ok(Some(course)) => Json(CourseResponse {
            course: CourseMapper::to_dto(course),
            success_message: "Course updated successfully".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Cascades: every enrollment of the course goes with it. Subscriptions are
/// untouched; they reference students, not courses.
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/courses/{}", id);
    match state.course_service.delete_course(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn course_enrollments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let enrollments = state
        .course_service
        .enrollments_for_course(&id)
        .into_iter()
        .map(EnrollmentMapper::to_dto)
        .collect();
    Json(EnrollmentListResponse { enrollments })
}

pub async fn course_attendance_csv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/courses/{}/attendance.csv", id);
    match state.backup_service.export_attendance_csv(&id) {
        Ok(Some(csv)) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            csv,
        )
            .into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "course not found").into_response(),
        Err(e) => domain_error_response(e),
    }
}
