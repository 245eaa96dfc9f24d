//! The persisted whole-store document.

use serde::{Deserialize, Serialize};

use crate::backend::domain::models::{
    Course, Enrollment, Expense, Mentor, Settings, Student, Subscription, User, WorkspaceSession,
    ADMIN_USER_ID,
};

/// All collections plus the settings singleton and the current identity,
/// exactly as persisted and as exported for backup.
///
/// Collections keep insertion order; list reads and the payment-alerts
/// derivation expose that order unchanged. Missing fields in an imported
/// document fall back to their defaults rather than failing the parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreDocument {
    pub current_user_id: Option<String>,
    pub users: Vec<User>,
    pub mentors: Vec<Mentor>,
    pub students: Vec<Student>,
    pub courses: Vec<Course>,
    pub enrollments: Vec<Enrollment>,
    pub workspace: Vec<WorkspaceSession>,
    pub subscriptions: Vec<Subscription>,
    pub expenses: Vec<Expense>,
    pub settings: Settings,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            current_user_id: Some(ADMIN_USER_ID.to_string()),
            users: vec![User::built_in_admin()],
            mentors: Vec::new(),
            students: Vec::new(),
            courses: Vec::new(),
            enrollments: Vec::new(),
            workspace: Vec::new(),
            subscriptions: Vec::new(),
            expenses: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl StoreDocument {
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn mentor(&self, id: &str) -> Option<&Mentor> {
        self.mentors.iter().find(|m| m.id == id)
    }

    pub fn enrollment(&self, id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_seeds_the_administrator() {
        let document = StoreDocument::default();
        assert_eq!(document.current_user_id.as_deref(), Some(ADMIN_USER_ID));
        assert_eq!(document.users.len(), 1);
        assert_eq!(document.users[0].username, "admin");
        assert!(document.students.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        // An older or hand-edited backup without some collections still loads.
        let document: StoreDocument = serde_json::from_str(r#"{"students": []}"#).unwrap();
        assert!(document.mentors.is_empty());
        assert_eq!(document.settings, crate::backend::domain::models::Settings::default());
    }
}
