//! Course catalogue and enrollment management.
//!
//! Owns the Course and Enrollment collections: catalogue CRUD, the
//! idempotent enroll operation, per-enrollment payments with the caller-side
//! `[0, total]` bound, and attendance toggling.

use log::{debug, info, warn};

use crate::backend::domain::commands::courses::{
    CoursePatch, CoursePaymentOutcome, CreateCourseCommand, EnrollCommand, EnrollOutcome,
    EnrollmentPatch, EnrollmentWithCourse,
};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::ledger::round_money;
use crate::backend::domain::models::{Course, Enrollment, EnrollmentStatus};
use crate::backend::storage::Store;
use std::collections::{BTreeMap, HashSet};

#[derive(Clone)]
pub struct CourseService {
    store: Store,
}

impl CourseService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // ------------------------------------------------------------------
    // Courses
    // ------------------------------------------------------------------

    pub fn list_courses(&self) -> Vec<Course> {
        self.store.read(|document| document.courses.clone())
    }

    pub fn get_course(&self, id: &str) -> Option<Course> {
        self.store.read(|document| document.course(id).cloned())
    }

    pub fn add_course(&self, command: CreateCourseCommand) -> DomainResult<Course> {
        let title = command.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation(
                "course title must not be empty".to_string(),
            ));
        }
        if command.price_total < 0.0 {
            return Err(DomainError::Validation(
                "course price must not be negative".to_string(),
            ));
        }
        let course = Course {
            id: Store::next_id(),
            title,
            mentor_id: command.mentor_id,
            price_total: round_money(command.price_total),
            created_at: Store::now(),
        };
        self.store
            .mutate(|document| document.courses.push(course.clone()))?;
        info!("added course {} ({})", course.title, course.id);
        Ok(course)
    }

    /// Merge the patch into the course. Unknown ids are a silent no-op and
    /// return `None`.
    pub fn update_course(&self, id: &str, patch: CoursePatch) -> DomainResult<Option<Course>> {
        if let Some(price_total) = patch.price_total {
            if price_total < 0.0 {
                return Err(DomainError::Validation(
                    "course price must not be negative".to_string(),
                ));
            }
        }
        let updated = self.store.mutate(|document| {
            let course = document.courses.iter_mut().find(|c| c.id == id)?;
            if let Some(title) = patch.title {
                course.title = title;
            }
            if let Some(mentor_id) = patch.mentor_id {
                course.mentor_id = mentor_id;
            }
            if let Some(price_total) = patch.price_total {
                course.price_total = round_money(price_total);
            }
            Some(course.clone())
        })?;
        if updated.is_none() {
            debug!("update for unknown course {} ignored", id);
        }
        Ok(updated)
    }

    /// Remove the course together with every enrollment that references it.
    /// Dependent subscriptions are untouched (they only reference students).
    pub fn delete_course(&self, id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.courses.len();
            document.courses.retain(|c| c.id != id);
            if document.courses.len() == before {
                debug!("delete for unknown course {} ignored", id);
                return;
            }
            let enrollments_before = document.enrollments.len();
            document.enrollments.retain(|e| e.course_id != id);
            info!(
                "deleted course {} with {} enrollments",
                id,
                enrollments_before - document.enrollments.len()
            );
        })?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Enrollments
    // ------------------------------------------------------------------

    pub fn list_enrollments(&self) -> Vec<Enrollment> {
        self.store.read(|document| document.enrollments.clone())
    }

    pub fn enrollments_for_course(&self, course_id: &str) -> Vec<Enrollment> {
        self.store.read(|document| {
            document
                .enrollments
                .iter()
                .filter(|e| e.course_id == course_id)
                .cloned()
                .collect()
        })
    }

    /// Enrollments of one student joined with their courses, as rendered by
    /// the student detail view.
    pub fn enrollments_for_student(&self, student_id: &str) -> Vec<EnrollmentWithCourse> {
        self.store.read(|document| {
            document
                .enrollments
                .iter()
                .filter(|e| e.student_id == student_id)
                .map(|e| EnrollmentWithCourse {
                    enrollment: e.clone(),
                    course: document.course(&e.course_id).cloned(),
                })
                .collect()
        })
    }

    /// Create one enrollment per course the student is not already enrolled
    /// in. Existing (student, course) pairs are silently skipped, which makes
    /// the operation idempotent per pair.
    pub fn enroll(&self, command: EnrollCommand) -> DomainResult<EnrollOutcome> {
        let outcome = self.store.mutate(|document| {
            let mut existing: HashSet<String> = document
                .enrollments
                .iter()
                .filter(|e| e.student_id == command.student_id)
                .map(|e| e.course_id.clone())
                .collect();

            let mut created = Vec::new();
            let mut skipped_course_ids = Vec::new();
            for course_id in command.course_ids {
                if !existing.insert(course_id.clone()) {
                    skipped_course_ids.push(course_id);
                    continue;
                }
                let enrollment = Enrollment {
                    id: Store::next_id(),
                    course_id,
                    student_id: command.student_id.clone(),
                    paid_amount: 0.0,
                    attendance: BTreeMap::new(),
                    grade: None,
                    status: EnrollmentStatus::Active,
                    created_at: Store::now(),
                };
                document.enrollments.push(enrollment.clone());
                created.push(enrollment);
            }
            EnrollOutcome {
                created,
                skipped_course_ids,
            }
        })?;
        info!(
            "enrolled student: {} created, {} skipped",
            outcome.created.len(),
            outcome.skipped_course_ids.len()
        );
        Ok(outcome)
    }

    /// Remove a single enrollment. Unknown ids are a silent no-op.
    pub fn unenroll(&self, enrollment_id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.enrollments.len();
            document.enrollments.retain(|e| e.id != enrollment_id);
            if document.enrollments.len() == before {
                debug!("unenroll for unknown enrollment {} ignored", enrollment_id);
            }
        })?;
        Ok(())
    }

    /// Merge the patch into the enrollment. The status is a free-form label
    /// with no transition rules. Unknown ids are a silent no-op.
    pub fn update_enrollment(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> DomainResult<Option<Enrollment>> {
        if let Some(grade) = patch.grade {
            if grade > 100 {
                return Err(DomainError::Validation(
                    "grade must be between 0 and 100".to_string(),
                ));
            }
        }
        let updated = self.store.mutate(|document| {
            let enrollment = document.enrollments.iter_mut().find(|e| e.id == id)?;
            if let Some(grade) = patch.grade {
                enrollment.grade = Some(grade);
            }
            if let Some(status) = patch.status {
                enrollment.status = status;
            }
            Some(enrollment.clone())
        })?;
        if updated.is_none() {
            debug!("update for unknown enrollment {} ignored", id);
        }
        Ok(updated)
    }

    /// Apply a signed payment delta to an enrollment, rounding the result to
    /// the cent. The `[0, price_total]` bound is checked here, before the
    /// store merge; the merge itself trusts its input. Unknown ids are a
    /// silent no-op and return `None`.
    pub fn record_payment(
        &self,
        enrollment_id: &str,
        delta: f64,
    ) -> DomainResult<Option<CoursePaymentOutcome>> {
        // Pre-check against the current snapshot, mirroring the payment form.
        let checked = self.store.read(|document| {
            document.enrollment(enrollment_id).map(|e| {
                let price = document.course(&e.course_id).map(|c| c.price_total);
                (round_money(e.paid_amount + delta), price)
            })
        });
        let Some((new_paid, price)) = checked else {
            debug!("payment for unknown enrollment {} ignored", enrollment_id);
            return Ok(None);
        };
        if new_paid < 0.0 {
            return Err(DomainError::Validation(
                "paid amount cannot be less than zero".to_string(),
            ));
        }
        if let Some(price) = price {
            if new_paid > price {
                return Err(DomainError::Validation(
                    "amount exceeds total price".to_string(),
                ));
            }
        } else {
            warn!(
                "enrollment {} references a missing course, upper bound unchecked",
                enrollment_id
            );
        }

        let outcome = self.store.mutate(|document| {
            let enrollment = document
                .enrollments
                .iter_mut()
                .find(|e| e.id == enrollment_id)?;
            enrollment.paid_amount = new_paid;
            Some(CoursePaymentOutcome {
                enrollment: enrollment.clone(),
                remaining: price.unwrap_or(0.0) - new_paid,
            })
        })?;
        Ok(outcome)
    }

    /// Flip the attendance flag for a day, creating the key when absent
    /// (absent reads as false). Returns the new flag, or `None` for unknown
    /// enrollments (silent no-op).
    pub fn toggle_attendance(
        &self,
        enrollment_id: &str,
        date: chrono::NaiveDate,
    ) -> DomainResult<Option<bool>> {
        let toggled = self.store.mutate(|document| {
            let enrollment = document
                .enrollments
                .iter_mut()
                .find(|e| e.id == enrollment_id)?;
            let current = *enrollment.attendance.get(&date).unwrap_or(&false);
            enrollment.attendance.insert(date, !current);
            Some(!current)
        })?;
        if toggled.is_none() {
            debug!(
                "attendance toggle for unknown enrollment {} ignored",
                enrollment_id
            );
        }
        Ok(toggled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::MemoryConnection;
    use chrono::NaiveDate;

    fn setup() -> CourseService {
        CourseService::new(Store::open(MemoryConnection::new()).unwrap())
    }

    fn course(service: &CourseService, title: &str, price: f64) -> Course {
        service
            .add_course(CreateCourseCommand {
                title: title.to_string(),
                mentor_id: None,
                price_total: price,
            })
            .unwrap()
    }

    fn enroll_one(service: &CourseService, student_id: &str, course_id: &str) -> Enrollment {
        service
            .enroll(EnrollCommand {
                student_id: student_id.to_string(),
                course_ids: vec![course_id.to_string()],
            })
            .unwrap()
            .created
            .remove(0)
    }

    #[test]
    fn test_enrolling_twice_creates_exactly_one_enrollment() {
        let service = setup();
        let c = course(&service, "Full-Stack React Bootcamp", 1200.0);

        let first = service
            .enroll(EnrollCommand {
                student_id: "s1".to_string(),
                course_ids: vec![c.id.clone()],
            })
            .unwrap();
        assert_eq!(first.created.len(), 1);

        let second = service
            .enroll(EnrollCommand {
                student_id: "s1".to_string(),
                course_ids: vec![c.id.clone()],
            })
            .unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.skipped_course_ids, vec![c.id.clone()]);

        assert_eq!(service.enrollments_for_course(&c.id).len(), 1);
    }

    #[test]
    fn test_enroll_skips_duplicates_within_one_call() {
        let service = setup();
        let c = course(&service, "Business English Level 1", 500.0);
        let outcome = service
            .enroll(EnrollCommand {
                student_id: "s1".to_string(),
                course_ids: vec![c.id.clone(), c.id.clone()],
            })
            .unwrap();
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.skipped_course_ids.len(), 1);
    }

    #[test]
    fn test_new_enrollments_start_active_and_unpaid() {
        let service = setup();
        let c = course(&service, "Graphic Design Masterclass", 800.0);
        let enrollment = enroll_one(&service, "s1", &c.id);
        assert_eq!(enrollment.paid_amount, 0.0);
        assert!(enrollment.attendance.is_empty());
        assert_eq!(enrollment.status, EnrollmentStatus::Active);
    }

    #[test]
    fn test_payment_deltas_stay_on_the_cent_grid() {
        let service = setup();
        let c = course(&service, "Full-Stack React Bootcamp", 1200.0);
        let enrollment = enroll_one(&service, "s1", &c.id);

        for delta in [33.33, 33.33, 33.34] {
            service.record_payment(&enrollment.id, delta).unwrap();
        }
        assert_eq!(service.list_enrollments()[0].paid_amount, 100.0);

        // Sub-cent deltas are rounded away at every step.
        let outcome = service
            .record_payment(&enrollment.id, 0.004)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.enrollment.paid_amount, 100.0);
        let outcome = service
            .record_payment(&enrollment.id, 0.01)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.enrollment.paid_amount, 100.01);
    }

    #[test]
    fn test_payment_is_bounded_by_the_course_price() {
        let service = setup();
        let c = course(&service, "Business English Level 1", 500.0);
        let enrollment = enroll_one(&service, "s1", &c.id);

        service.record_payment(&enrollment.id, 400.0).unwrap();

        let over = service.record_payment(&enrollment.id, 200.0).unwrap_err();
        assert!(matches!(over, DomainError::Validation(_)));
        let under = service.record_payment(&enrollment.id, -500.0).unwrap_err();
        assert!(matches!(under, DomainError::Validation(_)));

        // The rejected deltas left the paid amount untouched.
        assert_eq!(service.list_enrollments()[0].paid_amount, 400.0);

        // A correction within bounds is fine.
        let outcome = service
            .record_payment(&enrollment.id, -100.0)
            .unwrap()
            .unwrap();
        assert_eq!(outcome.enrollment.paid_amount, 300.0);
        assert_eq!(outcome.remaining, 200.0);
    }

    #[test]
    fn test_payment_for_unknown_enrollment_is_a_silent_noop() {
        let service = setup();
        assert!(service.record_payment("missing", 10.0).unwrap().is_none());
    }

    #[test]
    fn test_toggle_attendance_flips_and_creates_the_key() {
        let service = setup();
        let c = course(&service, "Graphic Design Masterclass", 800.0);
        let enrollment = enroll_one(&service, "s1", &c.id);
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();

        assert_eq!(service.toggle_attendance(&enrollment.id, day).unwrap(), Some(true));
        assert_eq!(service.toggle_attendance(&enrollment.id, day).unwrap(), Some(false));

        // The second toggle leaves an explicit false, not a missing key.
        let stored = &service.list_enrollments()[0];
        assert_eq!(stored.attendance.get(&day), Some(&false));
        assert_eq!(stored.attendance_count(), 0);
    }

    #[test]
    fn test_delete_course_cascades_enrollments() {
        let service = setup();
        let c = course(&service, "Full-Stack React Bootcamp", 1200.0);
        enroll_one(&service, "s1", &c.id);
        enroll_one(&service, "s2", &c.id);

        service.delete_course(&c.id).unwrap();
        assert!(service.list_courses().is_empty());
        assert!(service.list_enrollments().is_empty());
    }

    #[test]
    fn test_grade_above_100_is_rejected() {
        let service = setup();
        let c = course(&service, "Business English Level 1", 500.0);
        let enrollment = enroll_one(&service, "s1", &c.id);
        let err = service
            .update_enrollment(
                &enrollment.id,
                EnrollmentPatch {
                    grade: Some(120),
                    status: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let ok = service
            .update_enrollment(
                &enrollment.id,
                EnrollmentPatch {
                    grade: Some(95),
                    status: Some(EnrollmentStatus::Completed),
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(ok.grade, Some(95));
        assert_eq!(ok.status, EnrollmentStatus::Completed);
    }
}
