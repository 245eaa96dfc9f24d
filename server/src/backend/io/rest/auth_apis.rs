//! # REST API for Authentication
//!
//! The single-operator login gate. Bad credentials answer 401 rather than
//! the generic 400 used for other validation failures.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{CurrentUserResponse, LoginRequest, LoginResponse};

use crate::backend::domain::error::DomainError;
use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::settings_mapper::UserMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(current_user))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - {}", request.username);
    match state.auth_service.login(&request.username, &request.password) {
        Ok(user) => Json(LoginResponse {
            user: UserMapper::to_dto(user),
            success_message: "Signed in".to_string(),
        })
        .into_response(),
        Err(DomainError::Validation(message)) => {
            (StatusCode::UNAUTHORIZED, message).into_response()
        }
        Err(e) => domain_error_response(e),
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/auth/logout");
    match state.auth_service.logout() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn current_user(State(state): State<AppState>) -> impl IntoResponse {
    Json(CurrentUserResponse {
        user: state.auth_service.current_user().map(UserMapper::to_dto),
    })
}
