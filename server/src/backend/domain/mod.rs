//! # Domain Module
//!
//! Business logic for the training-center ledger.
//!
//! ## Module Organization
//!
//! - **ledger**: money rounding/formatting, elapsed-time billing, date-range
//!   membership; the primitives every derivation shares
//! - **mentor_service / student_service**: roster CRUD with the referential
//!   cleanup rules (mentor deletion unlinks courses; student deletion sweeps
//!   enrollments and subscriptions)
//! - **course_service**: catalogue CRUD, idempotent enrollment, payments,
//!   attendance
//! - **workspace_service**: hourly-billed walk-in sessions
//! - **subscription_service**: flat-rate plans and their payments
//! - **expense_service**: operating expenses
//! - **settings_service**: the process-wide settings singleton
//! - **auth_service**: the single-operator login gate
//! - **metrics_service**: the derivation engine (balances, revenue, debt,
//!   profit, range-filtered reports)
//! - **backup_service**: whole-store import/export and the spreadsheet flows
//!
//! ## Design Principles
//!
//! - Services are thin handles over an explicit [`crate::backend::storage::Store`];
//!   there is no ambient global state.
//! - Mutation always goes through named operations so id/timestamp assignment
//!   and referential cleanup cannot be skipped.
//! - Derivations are pure projections recomputed per read.
//! - Unknown-id updates and deletes are silent no-ops by contract.

pub mod auth_service;
pub mod backup_service;
pub mod commands;
pub mod course_service;
pub mod error;
pub mod expense_service;
pub mod ledger;
pub mod mentor_service;
pub mod metrics_service;
pub mod models;
pub mod settings_service;
pub mod student_service;
pub mod subscription_service;
pub mod workspace_service;

pub use auth_service::AuthService;
pub use backup_service::BackupService;
pub use course_service::CourseService;
pub use error::{DomainError, DomainResult};
pub use expense_service::ExpenseService;
pub use mentor_service::MentorService;
pub use metrics_service::MetricsService;
pub use settings_service::SettingsService;
pub use student_service::StudentService;
pub use subscription_service::SubscriptionService;
pub use workspace_service::WorkspaceService;
