//! In-process persistence backend.
//!
//! Used by unit tests that exercise store and service behavior without
//! touching the filesystem. Behaves exactly like a file backend that never
//! fails.

use anyhow::Result;
use std::sync::Mutex;

use crate::backend::storage::document::StoreDocument;
use crate::backend::storage::traits::DocumentStore;

#[derive(Default)]
pub struct MemoryConnection {
    document: Mutex<Option<StoreDocument>>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document instead of an empty backend.
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

impl DocumentStore for MemoryConnection {
    fn load(&self) -> Result<Option<StoreDocument>> {
        Ok(self.document.lock().unwrap().clone())
    }

    fn save(&self, document: &StoreDocument) -> Result<()> {
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}
