//! Mentor roster management.
//!
//! Mentors are weakly referenced by courses: deleting a mentor unlinks the
//! reference on every dependent course instead of cascading into them.

use log::{debug, info};

use crate::backend::domain::commands::people::{CreateMentorCommand, MentorPatch};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::Mentor;
use crate::backend::storage::Store;

#[derive(Clone)]
pub struct MentorService {
    store: Store,
}

impl MentorService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Mentor> {
        self.store.read(|document| document.mentors.clone())
    }

    pub fn get(&self, id: &str) -> Option<Mentor> {
        self.store.read(|document| document.mentor(id).cloned())
    }

    pub fn add(&self, command: CreateMentorCommand) -> DomainResult<Mentor> {
        let name = command.name.trim().to_string();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "mentor name must not be empty".to_string(),
            ));
        }
        let mentor = Mentor {
            id: Store::next_id(),
            name,
            phone: command.phone,
            email: command.email,
            notes: command.notes,
        };
        self.store
            .mutate(|document| document.mentors.push(mentor.clone()))?;
        info!("added mentor {} ({})", mentor.name, mentor.id);
        Ok(mentor)
    }

    /// Merge the patch into the mentor. Unknown ids are a silent no-op and
    /// return `None`.
    pub fn update(&self, id: &str, patch: MentorPatch) -> DomainResult<Option<Mentor>> {
        let updated = self.store.mutate(|document| {
            let mentor = document.mentors.iter_mut().find(|m| m.id == id)?;
            if let Some(name) = patch.name {
                mentor.name = name;
            }
            if let Some(phone) = patch.phone {
                mentor.phone = Some(phone);
            }
            if let Some(email) = patch.email {
                mentor.email = Some(email);
            }
            if let Some(notes) = patch.notes {
                mentor.notes = Some(notes);
            }
            Some(mentor.clone())
        })?;
        if updated.is_none() {
            debug!("update for unknown mentor {} ignored", id);
        }
        Ok(updated)
    }

    /// Remove the mentor and clear the `mentor_id` reference on every course
    /// that pointed at it. Unknown ids are a silent no-op.
    pub fn delete(&self, id: &str) -> DomainResult<()> {
        self.store.mutate(|document| {
            let before = document.mentors.len();
            document.mentors.retain(|m| m.id != id);
            if document.mentors.len() == before {
                debug!("delete for unknown mentor {} ignored", id);
                return;
            }
            let mut unlinked = 0;
            for course in document
                .courses
                .iter_mut()
                .filter(|c| c.mentor_id.as_deref() == Some(id))
            {
                course.mentor_id = None;
                unlinked += 1;
            }
            info!("deleted mentor {}, unlinked {} courses", id, unlinked);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::course_service::CourseService;
    use crate::backend::domain::commands::courses::CreateCourseCommand;
    use crate::backend::storage::MemoryConnection;

    fn setup() -> (MentorService, CourseService, Store) {
        let store = Store::open(MemoryConnection::new()).unwrap();
        (
            MentorService::new(store.clone()),
            CourseService::new(store.clone()),
            store,
        )
    }

    fn mentor_command(name: &str) -> CreateMentorCommand {
        CreateMentorCommand {
            name: name.to_string(),
            phone: None,
            email: None,
            notes: None,
        }
    }

    #[test]
    fn test_add_and_list_mentors() {
        let (service, _, _) = setup();
        let mentor = service.add(mentor_command("Dr. Ahmed Salem")).unwrap();
        assert_eq!(service.list(), vec![mentor]);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let (service, _, _) = setup();
        let err = service.add(mentor_command("   ")).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_update_unknown_mentor_is_a_silent_noop() {
        let (service, _, _) = setup();
        let patch = MentorPatch {
            name: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(service.update("missing", patch).unwrap().is_none());
    }

    #[test]
    fn test_delete_unlinks_courses_instead_of_cascading() {
        let (service, course_service, _) = setup();
        let mentor = service.add(mentor_command("Sarah Johnson")).unwrap();

        for title in ["Graphic Design Masterclass", "UI Foundations"] {
            course_service
                .add_course(CreateCourseCommand {
                    title: title.to_string(),
                    mentor_id: Some(mentor.id.clone()),
                    price_total: 800.0,
                })
                .unwrap();
        }

        service.delete(&mentor.id).unwrap();

        assert!(service.list().is_empty());
        let courses = course_service.list_courses();
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.mentor_id.is_none()));
    }

    #[test]
    fn test_delete_unknown_mentor_is_a_silent_noop() {
        let (service, _, _) = setup();
        service.add(mentor_command("Mohammed Ali")).unwrap();
        service.delete("missing").unwrap();
        assert_eq!(service.list().len(), 1);
    }
}
