//! # Storage Module
//!
//! The entity store and its persistence backends.
//!
//! The whole application state lives in a single [`document::StoreDocument`]
//! held in memory by [`store::Store`]. There is no incremental persistence:
//! every mutation rewrites the full document through a [`traits::DocumentStore`]
//! backend before the mutator returns, so a derivation read always observes
//! the state of the most recently completed mutation.
//!
//! Backends:
//! - [`json::JsonConnection`]: one JSON file under the data directory,
//!   written atomically via a temp-file rename.
//! - [`memory::MemoryConnection`]: in-process backend used by fast tests.

pub mod document;
pub mod json;
pub mod memory;
pub mod store;
pub mod traits;

pub use document::StoreDocument;
pub use json::JsonConnection;
pub use memory::MemoryConnection;
pub use store::Store;
pub use traits::DocumentStore;
