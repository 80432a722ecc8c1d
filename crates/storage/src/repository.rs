use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use anzan_core::model::{AnswerRecord, SessionId};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape for one quiz session.
///
/// This mirrors the live session so adapters can serialize/deserialize
/// without leaking storage concerns into the domain layer. The pending
/// question is stored as its terms plus the expected sum; both are present
/// or both are absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub grade_name: String,
    pub question_index: u8,
    pub correct_count: u8,
    pub history: Vec<AnswerRecord>,
    pub pending_terms: Option<Vec<u32>>,
    pub pending_answer: Option<i64>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Repository contract for per-session quiz state.
///
/// Each `SessionId` maps to at most one record. The transport in front of
/// the quiz is expected to serialize requests for a given session, so
/// adapters only need to keep each entry internally consistent.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Fetch the stored session, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails; a missing session is
    /// `Ok(None)`, not an error.
    async fn load(&self, id: SessionId) -> Result<Option<SessionRecord>, StorageError>;

    /// Persist the session, replacing any previous record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored. A failed save
    /// must leave the previously stored record intact.
    async fn save(&self, id: SessionId, record: &SessionRecord) -> Result<(), StorageError>;

    /// Remove the stored session; succeeds when nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails.
    async fn clear(&self, id: SessionId) -> Result<(), StorageError>;
}

/// Simple in-memory session store for testing, prototyping and
/// single-process serving.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionStore {
    async fn load(&self, id: SessionId) -> Result<Option<SessionRecord>, StorageError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&id).cloned())
    }

    async fn save(&self, id: SessionId, record: &SessionRecord) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(id, record.clone());
        Ok(())
    }

    async fn clear(&self, id: SessionId) -> Result<(), StorageError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(&id);
        Ok(())
    }
}
