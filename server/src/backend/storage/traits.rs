//! Persistence seam for the entity store.

use anyhow::Result;

use crate::backend::storage::document::StoreDocument;

/// A backend able to load and persist the whole store document.
///
/// Writes must be atomic: a reader (including a crashed-and-restarted
/// process) never observes a partially written document.
pub trait DocumentStore: Send + Sync {
    /// Load the persisted document, or `None` when none exists yet.
    fn load(&self) -> Result<Option<StoreDocument>>;

    /// Persist the document, replacing any previous version.
    fn save(&self, document: &StoreDocument) -> Result<()>;
}
