//! Domain model for a course.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    /// Weak reference to a Mentor. Deleting the mentor clears this field on
    /// every dependent course; it never cascades to the course itself.
    pub mentor_id: Option<String>,
    pub price_total: f64,
    pub created_at: DateTime<Utc>,
}
