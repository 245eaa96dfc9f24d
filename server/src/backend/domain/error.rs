//! Domain error taxonomy.
//!
//! Unknown-id updates and deletes are deliberately NOT errors: those
//! operations are silent no-ops and surface as `None`/empty results.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected before anything was mutated (blank required name,
    /// payment delta pushing the paid amount outside `[0, total]`, ...).
    #[error("{0}")]
    Validation(String),

    /// A document could not be parsed. The store is left unchanged.
    #[error("parse error: {0}")]
    Parse(String),

    /// The persistence layer failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type DomainResult<T> = Result<T, DomainError>;
