//! # REST API for Subscriptions

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use log::info;
use shared::{
    CreateSubscriptionRequest, PaymentRequest, PaymentResponse, SubscriptionListResponse,
    SubscriptionResponse,
};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::activity_mapper::SubscriptionMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_subscriptions).post(create_subscription))
        .route("/:id/payments", post(record_payment))
        .route("/:id", axum::routing::delete(delete_subscription))
}

pub async fn list_subscriptions(State(state): State<AppState>) -> impl IntoResponse {
    let subscriptions = state
        .subscription_service
        .list()
        .into_iter()
        .map(SubscriptionMapper::to_dto)
        .collect();
    Json(SubscriptionListResponse { subscriptions })
}

pub async fn create_subscription(
    State(state): State<AppState>,
    Json(request): Json<CreateSubscriptionRequest>,
) -> impl IntoResponse {
    info!("POST /api/subscriptions - plan {}", request.plan);
    let command = match SubscriptionMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => return domain_error_response(e),
    };
    match state.subscription_service.add(command) {
        Ok(subscription) => (
            StatusCode::CREATED,
            Json(SubscriptionResponse {
                subscription: SubscriptionMapper::to_dto(subscription),
                success_message: "Subscription added successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

/// Signed delta; the service enforces the `[0, total_price]` bound.
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PaymentRequest>,
) -> impl IntoResponse {
    info!("POST /api/subscriptions/{}/payments - {}", id, request.amount);
    match state.subscription_service.record_payment(&id, request.amount) {
        Ok(Some(outcome)) => Json(PaymentResponse {
            id: outcome.subscription.id.clone(),
            paid_amount: outcome.subscription.paid_amount,
            remaining: outcome.remaining,
            success_message: "Payment recorded".to_string(),
        })
        .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn delete_subscription(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/subscriptions/{}", id);
    match state.subscription_service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
