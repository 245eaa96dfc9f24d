//! Domain model for a walk-in workspace session.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A billed-by-time visit. The session is open while `check_out_at` is
/// absent; open sessions bill zero until checked out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSession {
    pub id: String,
    /// Calendar day the visit is booked under.
    pub date: NaiveDate,
    pub person_name: String,
    pub check_in_at: DateTime<Utc>,
    pub check_out_at: Option<DateTime<Utc>>,
}

impl WorkspaceSession {
    pub fn is_open(&self) -> bool {
        self.check_out_at.is_none()
    }
}
