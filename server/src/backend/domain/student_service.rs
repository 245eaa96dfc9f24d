//! Student roster management.
//!
//! Students own their enrollments and subscriptions: deleting a student
//! sweeps both so no orphaned references remain.

use log::{debug, info};

use crate::backend::domain::commands::people::{
    CreateStudentCommand, ImportStudentsResult, StudentPatch, StudentRow,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::Student;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct StudentService {
    store: Store,
}

impl StudentService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Student> {
        self.store.read(|document| document.students.clone())
    }

    pub fn get(&self, id: &str) -> Option<Student> {
        self.store.read(|document| document.student(id).cloned())
    }

    pub fn add(&self, command: CreateStudentCommand) -> DomainResult<Student> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "student name must not be empty".to_string(),
            ));
        }
        let student = Student {
            id: Store::next_id(),
            name,
            phone: command.phone,
            email: command.email,
            notes: command.notes,
        };
        self.store
            .mutate(|document| document.students.push(student.clone()))?;
        info!("added student {} ({})", student.name, student.id);
        Ok(student)
    }

    /// Append one student per row with a non-blank name; rows with a blank
    /// name are silently dropped and only counted.
    pub fn add_batch(&self, rows: Vec<StudentRow>) -> DomainResult<ImportStudentsResult> {
        let total = rows.len();
        let students: Vec<Student> = rows
            .into_iter()
            .filter_map(|row| {
                let name = row.name.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                Some(Student {
                    id: Store::next_id(),
                    name,
                    phone: row.phone.map(|p| p.trim().to_string()).filter(|p| !p.is_empty()),
                    email: None,
                    notes: None,
                })
            })
            .collect();

        let imported_count = students.len();
        self.store
            .mutate(|document| document.students.extend(students))?;
        info!(
            "imported {} students ({} rows dropped for blank names)",
            imported_count,
            total - imported_count
        );
        Ok(ImportStudentsResult {
            imported_count,
            skipped_count: total - imported_count,
        })
    }

    /// Merge the patch into the student. Unknown ids are a silent no-op and
    /// return `None`.
    pub fn update(&self, id: &str, patch: StudentPatch) -> DomainResult<Option<Student>> {
        let updated = self.store.mutate(|document| {
            let student = document.students.iter_mut().find(|s| s.id == id)?;
            if let Some(name) = patch.name {
                student.name = name;
            }
            if let Some(phone) = patch.phone {
                student.phone = Some(phone);
            }
            if let Some(email) = patch.email {
                student.email = Some(email);
            }
            if let Some(notes) = patch.notes {
                student.notes = Some(notes);
            }
            Some(student.clone())
        })?;
        if updated.is_none() {
            debug!("update for unknown student {} ignored", id);
        }
        Ok(updated)
    }

    /// Remove the student together with every enrollment and subscription
    /// that references it. Unknown ids are a silent no-op.
    pub fn delete(&self, id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.students.len();
            document.students.retain(|s| s.id != id);
            if document.students.len() == before {
                debug!("delete for unknown student {} ignored", id);
                return;
            }
            let enrollments_before = document.enrollments.len();
            document.enrollments.retain(|e| e.student_id != id);
            let subscriptions_before = document.subscriptions.len();
            document
                .subscriptions
                .retain(|sub| sub.student_id.as_deref() != Some(id));
            info!(
                "deleted student {} with {} enrollments and {} subscriptions",
                id,
                enrollments_before - document.enrollments.len(),
                subscriptions_before - document.subscriptions.len()
            );
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::courses::{CreateCourseCommand, EnrollCommand};
    use crate::backend::domain::commands::subscriptions::CreateSubscriptionCommand;
    use crate::backend::domain::course_service::CourseService;
    use crate::backend::domain::models::{PaymentMethod, SubscriptionPlan};
    use crate::backend::domain::subscription_service::SubscriptionService;
    use crate::backend::storage::MemoryConnection;

    fn setup() -> (StudentService, CourseService, SubscriptionService, Store) {
        let store = Store::open(MemoryConnection::new()).unwrap();
        (
            StudentService::new(store.clone()),
            CourseService::new(store.clone()),
            SubscriptionService::new(store.clone()),
            store,
        )
    }

    fn student_command(name: &str) -> CreateStudentCommand {
        CreateStudentCommand {
            name: name.to_string(),
            phone: None,
            email: None,
            notes: None,
        }
    }

    #[test]
    fn test_add_batch_drops_blank_names() {
        let (service, _, _, _) = setup();
        let result = service
            .add_batch(vec![
                StudentRow {
                    name: "Omar Khalid".to_string(),
                    phone: Some("0592233445".to_string()),
                },
                StudentRow {
                    name: "   ".to_string(),
                    phone: Some("0591111111".to_string()),
                },
                StudentRow {
                    name: "".to_string(),
                    phone: None,
                },
                StudentRow {
                    name: "Laila Mahmoud".to_string(),
                    phone: None,
                },
            ])
            .unwrap();

        assert_eq!(result.imported_count, 2);
        assert_eq!(result.skipped_count, 2);
        let names: Vec<String> = service.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Omar Khalid", "Laila Mahmoud"]);
    }

    #[test]
    fn test_delete_cascades_enrollments_and_subscriptions() {
        let (students, courses, subscriptions, store) = setup();
        let student = students.add(student_command("Yousef Hassan")).unwrap();
        let bystander = students.add(student_command("Mariam Isaac")).unwrap();

        let course_a = courses
            .add_course(CreateCourseCommand {
                title: "Full-Stack React Bootcamp".to_string(),
                mentor_id: None,
                price_total: 1200.0,
            })
            .unwrap();
        let course_b = courses
            .add_course(CreateCourseCommand {
                title: "Business English Level 1".to_string(),
                mentor_id: None,
                price_total: 500.0,
            })
            .unwrap();

        courses
            .enroll(EnrollCommand {
                student_id: student.id.clone(),
                course_ids: vec![course_a.id.clone(), course_b.id.clone()],
            })
            .unwrap();
        courses
            .enroll(EnrollCommand {
                student_id: bystander.id.clone(),
                course_ids: vec![course_a.id.clone()],
            })
            .unwrap();
        subscriptions
            .add(CreateSubscriptionCommand {
                student_id: Some(student.id.clone()),
                person_name: None,
                plan: SubscriptionPlan::Monthly,
                total_price: None,
                method: PaymentMethod::Cash,
            })
            .unwrap();

        students.delete(&student.id).unwrap();

        store.read(|document| {
            assert!(document.students.iter().all(|s| s.id != student.id));
            assert!(document.enrollments.iter().all(|e| e.student_id != student.id));
            assert!(document
                .subscriptions
                .iter()
                .all(|sub| sub.student_id.as_deref() != Some(student.id.as_str())));
            // The bystander's enrollment survives.
            assert_eq!(document.enrollments.len(), 1);
            assert_eq!(document.enrollments[0].student_id, bystander.id);
        });
    }

    #[test]
    fn test_update_unknown_student_is_a_silent_noop() {
        let (service, _, _, _) = setup();
        assert!(service
            .update("missing", StudentPatch::default())
            .unwrap()
            .is_none());
    }
}
