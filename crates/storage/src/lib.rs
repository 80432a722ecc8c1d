//! Storage adapters for quiz session state.

#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{InMemorySessionStore, SessionRecord, SessionRepository, StorageError};
