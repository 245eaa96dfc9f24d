//! Domain model for a course enrollment.
//!
//! An enrollment ties one student to one course and carries the payment and
//! attendance state for that pair. At most one enrollment exists per
//! (student, course) pair; the enroll operation silently skips existing pairs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Free-form three-value label. Any status may move to any other status at
/// any time; there are no engine-enforced transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Completed,
    Dropped,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Active => "active",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(EnrollmentStatus::Active),
            "completed" => Ok(EnrollmentStatus::Completed),
            "dropped" => Ok(EnrollmentStatus::Dropped),
            other => Err(format!("unknown enrollment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub paid_amount: f64,
    /// Presence per calendar day. A missing key reads as absent; toggling an
    /// absent day inserts an explicit `true`.
    pub attendance: BTreeMap<NaiveDate, bool>,
    /// 0-100
    pub grade: Option<u8>,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    /// Number of days marked present.
    pub fn attendance_count(&self) -> usize {
        self.attendance.values().filter(|present| **present).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            EnrollmentStatus::Active,
            EnrollmentStatus::Completed,
            EnrollmentStatus::Dropped,
        ] {
            assert_eq!(status.as_str().parse::<EnrollmentStatus>(), Ok(status));
        }
        assert!("archived".parse::<EnrollmentStatus>().is_err());
    }

    #[test]
    fn test_attendance_count_ignores_explicit_absences() {
        let mut enrollment = Enrollment {
            id: "e1".to_string(),
            course_id: "c1".to_string(),
            student_id: "s1".to_string(),
            paid_amount: 0.0,
            attendance: BTreeMap::new(),
            grade: None,
            status: EnrollmentStatus::Active,
            created_at: Utc::now(),
        };
        enrollment
            .attendance
            .insert(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), true);
        enrollment
            .attendance
            .insert(NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(), false);
        assert_eq!(enrollment.attendance_count(), 1);
    }
}
