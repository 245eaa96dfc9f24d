//! # Backend Module
//!
//! Everything behind the HTTP surface of the training-center dashboard.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! IO Layer (REST API, mappers)
//!     ↓
//! Domain Layer (services, derivation engine)
//!     ↓
//! Storage Layer (entity store, JSON document persistence)
//! ```
//!
//! Control flow is strictly one way: REST handlers call store mutators
//! through the services, mutators persist the whole document, and the
//! derivation engine recomputes its aggregates from the store on demand.
//! The import/export bridge only touches the store boundary (whole-state
//! replace or batch insert), never the derivation engine.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::backend::domain::{
    AuthService, BackupService, CourseService, ExpenseService, MentorService, MetricsService,
    SettingsService, StudentService, SubscriptionService, WorkspaceService,
};
use crate::backend::io::rest;
use crate::backend::storage::{JsonConnection, Store};

/// Main application state that holds all services. Cloning is cheap; every
/// service shares the same underlying store handle.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub mentor_service: MentorService,
    pub student_service: StudentService,
    pub course_service: CourseService,
    pub workspace_service: WorkspaceService,
    pub subscription_service: SubscriptionService,
    pub expense_service: ExpenseService,
    pub settings_service: SettingsService,
    pub metrics_service: MetricsService,
    pub backup_service: BackupService,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            auth_service: AuthService::new(store.clone()),
            mentor_service: MentorService::new(store.clone()),
            student_service: StudentService::new(store.clone()),
            course_service: CourseService::new(store.clone()),
            workspace_service: WorkspaceService::new(store.clone()),
            subscription_service: SubscriptionService::new(store.clone()),
            expense_service: ExpenseService::new(store.clone()),
            settings_service: SettingsService::new(store.clone()),
            metrics_service: MetricsService::new(store.clone()),
            backup_service: BackupService::new(store),
        }
    }
}

/// Initialize the backend: open (or seed) the persisted store and wire up
/// all services.
pub fn initialize_backend() -> Result<AppState> {
    info!("Setting up storage");
    let connection = JsonConnection::new_default()?;
    let store = Store::open(connection)?;

    info!("Setting up domain services");
    Ok(AppState::new(store))
}

/// Create the Axum router with all routes configured.
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow a frontend dev server to make requests
    let cors = CorsLayer::new()
        .allow_origin("http://localhost:8080".parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/auth", rest::auth_apis::router())
        .nest("/mentors", rest::mentor_apis::router())
        .nest("/students", rest::student_apis::router())
        .nest("/courses", rest::course_apis::router())
        .nest("/enrollments", rest::enrollment_apis::router())
        .nest("/workspace", rest::workspace_apis::router())
        .nest("/subscriptions", rest::subscription_apis::router())
        .nest("/expenses", rest::expense_apis::router())
        .nest("/settings", rest::settings_apis::router())
        .nest("/metrics", rest::metrics_apis::router())
        .nest("/backup", rest::backup_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryConnection;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        AppState::new(Store::open(MemoryConnection::new()).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_student_create_then_list_round_trips() {
        let router = create_router(test_state());

        let create = Request::builder()
            .method("POST")
            .uri("/api/students")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"name": "Omar Khalid", "phone": "0592233445", "email": null, "notes": null}"#,
            ))
            .unwrap();
        let response = router.clone().oneshot(create).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let list = Request::builder()
            .uri("/api/students")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(list).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["students"][0]["name"], "Omar Khalid");
    }

    #[tokio::test]
    async fn test_update_of_unknown_id_answers_no_content() {
        let router = create_router(test_state());
        let request = Request::builder()
            .method("PUT")
            .uri("/api/mentors/missing")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "Ghost"}"#))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_malformed_backup_import_answers_bad_request() {
        let router = create_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/backup/import")
            .body(Body::from("{not json"))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_reports_seeded_store() {
        let router = create_router(test_state());
        let request = Request::builder()
            .uri("/api/metrics/dashboard")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["student_count"], 0);
        assert_eq!(json["summary"]["total_revenue"], 0.0);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password_answers_unauthorized() {
        let router = create_router(test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"username": "admin", "password": "hunter2"}"#,
            ))
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
