//! # REST API for Expenses

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use log::info;
use shared::{CreateExpenseRequest, ExpenseListResponse, ExpenseResponse};

use crate::backend::io::rest::domain_error_response;
use crate::backend::io::rest::mappers::activity_mapper::ExpenseMapper;
use crate::backend::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_expenses).post(create_expense))
        .route("/:id", axum::routing::delete(delete_expense))
}

pub async fn list_expenses(State(state): State<AppState>) -> impl IntoResponse {
    let expenses = state
        .expense_service
        .list()
        .into_iter()
        .map(ExpenseMapper::to_dto)
        .collect();
    Json(ExpenseListResponse { expenses })
}

pub async fn create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /api/expenses - {}", request.title);
    let command = match ExpenseMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => return domain_error_response(e),
    };
    match state.expense_service.add(command) {
        Ok(expense) => (
            StatusCode::CREATED,
            Json(ExpenseResponse {
                expense: ExpenseMapper::to_dto(expense),
                success_message: "Expense recorded".to_string(),
            }),
        )
            .into_response(),
        Err(e) => domain_error_response(e),
    }
}

pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/expenses/{}", id);
    match state.expense_service.delete(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => domain_error_response(e),
    }
}
