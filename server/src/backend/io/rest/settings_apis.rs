//! # REST API for Settings

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{SettingsResponse, UpdateSettingsRequest};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::settings_mapper::SettingsMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_settings).put(update_settings))
}

pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    Json(SettingsResponse {
        settings: SettingsMapper::to_dto(state.settings_service.get()),
    })
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings");
    let patch = match SettingsMapper::to_patch(request) {
        Ok(patch) => patch,
        Err(e) => return domain_error_response(e),
    };
    match state.settings_service.update(patch) {
        Ok(settings) => Json(SettingsResponse {
            settings: SettingsMapper::to_dto(settings),
        })
        .into_response(),
        Err(e) => domain_error_response(e),
    }
}
