//! # REST API for Mentors

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{CreateMentorRequest, MentorListResponse, MentorResponse, UpdateMentorRequest};

use crate::backend::io::rest::mappers::people_mapper::MentorMapper;
use crate::backend::io::rest::domain_error_response;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_mentors).post(create_mentor))
        .route("/:id", axum::routing::put(update_mentor).delete(delete_mentor))
}

pub async fn list_mentors(State(state): State<AppState>) -> impl IntoResponse {
    let mentors = state
        .mentor_service
        .list()
        .into_iter()
        .map(MentorMapper::to_dto)
        .collect();
    Json(MentorListResponse { mentors })
}

pub async fn create_mentor(
    State(state): State<AppState>,
    Json(request): Json<CreateMentorRequest>,
) -> impl IntoResponse {
    info!("POST /api/mentors - {}", request.name);
    match state
        .mentor_service
        .add(MentorMapper::to_create_command(request))
    {
        Ok(mentor) => (
            StatusCode::CREATED,
            Json(MentorResponse {
                mentor: MentorMapper::to_dto(mentor),
                success_message: "Mentor added successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Unknown ids answer 204: updates are silent no-ops by store contract.
pub async fn update_mentor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMentorRequest>,
) -> impl IntoResponse {
    info!("PUT /api/mentors/{}", id);
    match state.mentor_service.update(&id, MentorMapper::to_patch(request)) {
        Ok(Some(mentor)) => Json(MentorResponse {
            mentor: MentorMapper::to_dto(mentor),
            success_message: "Mentor updated successfully".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn delete_mentor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/mentors/{}", id);
    match state.mentor_service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
