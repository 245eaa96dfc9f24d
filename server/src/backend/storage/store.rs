//! The entity store: single source of truth for all collections.

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::backend::storage::document::StoreDocument;
use crate::backend::storage::traits::DocumentStore;

/// Handle to the in-memory document plus its persistence backend.
///
/// All mutation goes through [`Store::mutate`], which runs the closure under
/// the lock and persists the whole document before returning. Reads through
/// [`Store::read`] therefore always observe the state of the most recently
/// completed mutation, never a partial one. Cloning the handle shares the
/// same underlying state; services each hold a clone.
#[derive(Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    document: Mutex<StoreDocument>,
    connection: Box<dyn DocumentStore>,
}

impl Store {
    /// Open the store: load the persisted document, or seed defaults (the
    /// built-in administrator plus default settings) when none exists yet.
    pub fn open(connection: impl DocumentStore + 'static) -> Result<Self> {
        let document = match connection.load()? {
            Some(document) => {
                info!(
                    "loaded store document ({} students, {} courses, {} enrollments)",
                    document.students.len(),
                    document.courses.len(),
                    document.enrollments.len()
                );
                document
            }
            None => {
                info!("no persisted document found, seeding defaults");
                let document = StoreDocument::default();
                connection.save(&document)?;
                document
            }
        };
        Ok(Self {
            inner: Arc::new(StoreInner {
                document: Mutex::new(document),
                connection: Box::new(connection),
            }),
        })
    }

    /// Run a read-only projection over the current document.
    pub fn read<R>(&self, f: impl FnOnce(&StoreDocument) -> R) -> R {
        let document = self.inner.document.lock().unwrap();
        f(&document)
    }

    /// Run a mutation and persist the resulting document.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut StoreDocument) -> R) -> Result<R> {
        let mut document = self.inner.document.lock().unwrap();
        let out = f(&mut document);
        self.inner.connection.save(&document)?;
        Ok(out)
    }

    /// Whole-state replacement, used by the import path.
    pub fn replace(&self, new_document: StoreDocument) -> Result<()> {
        let mut document = self.inner.document.lock().unwrap();
        *document = new_document;
        self.inner.connection.save(&document)?;
        Ok(())
    }

    /// Clone of the full document, used by the export path.
    pub fn snapshot(&self) -> StoreDocument {
        self.read(|document| document.clone())
    }

    /// Opaque unique id for a newly created entity. Never reused.
    pub fn next_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Creation timestamp for a newly created entity.
    pub fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::Student;
    use crate::backend::storage::json::JsonConnection;
    use crate::backend::storage::memory::MemoryConnection;
    use tempfile::TempDir;

    #[test]
    fn test_open_seeds_defaults_on_first_run() {
        let store = Store::open(MemoryConnection::new()).unwrap();
        store.read(|document| {
            assert_eq!(document.users.len(), 1);
            assert!(document.students.is_empty());
        });
    }

    #[test]
    fn test_mutation_is_visible_to_subsequent_reads() {
        let store = Store::open(MemoryConnection::new()).unwrap();
        store
            .mutate(|document| {
                document.students.push(Student {
                    id: Store::next_id(),
                    name: "Omar Khalid".to_string(),
                    phone: None,
                    email: None,
                    notes: None,
                });
            })
            .unwrap();
        assert_eq!(store.read(|document| document.students.len()), 1);
    }

    #[test]
    fn test_every_mutation_is_persisted_across_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let store = Store::open(JsonConnection::new(temp_dir.path()).unwrap()).unwrap();
        store
            .mutate(|document| {
                document.students.push(Student {
                    id: "s1".to_string(),
                    name: "Laila Mahmoud".to_string(),
                    phone: Some("0595566778".to_string()),
                    email: None,
                    notes: None,
                });
            })
            .unwrap();
        drop(store);

        let reopened = Store::open(JsonConnection::new(temp_dir.path()).unwrap()).unwrap();
        reopened.read(|document| {
            assert_eq!(document.students.len(), 1);
            assert_eq!(document.students[0].name, "Laila Mahmoud");
        });
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Store::next_id();
        let b = Store::next_id();
        assert_ne!(a, b);
    }
}
