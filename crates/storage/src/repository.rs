use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::QuestionId;
use thiserror::Error;

use crate::json::JsonStateStore;

/// Errors surfaced by state-store adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The two persisted id lists.
///
/// `SessionQuestions` holds every id already served this session so fresh
/// loads can avoid repeats; `WrongQuestions` holds the ids answered wrong on
/// the most recent submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StateKey {
    SessionQuestions,
    WrongQuestions,
}

/// Persistence contract for the locally tracked id lists.
///
/// Semantics are deliberately simple key-value: `save` replaces the whole
/// list, last write wins, no cross-process coordination.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load a persisted id list. Missing state loads as the empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn load(&self, key: StateKey) -> Result<Vec<QuestionId>, StorageError>;

    /// Replace a persisted id list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn save(&self, key: StateKey, ids: &[QuestionId]) -> Result<(), StorageError>;

    /// Clear a persisted id list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be written.
    async fn clear(&self, key: StateKey) -> Result<(), StorageError>;
}

/// Simple in-memory state store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStateStore {
    lists: Arc<Mutex<HashMap<StateKey, Vec<QuestionId>>>>,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self, key: StateKey) -> Result<Vec<QuestionId>, StorageError> {
        let guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.get(&key).cloned().unwrap_or_default())
    }

    async fn save(&self, key: StateKey, ids: &[QuestionId]) -> Result<(), StorageError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.insert(key, ids.to_vec());
        Ok(())
    }

    async fn clear(&self, key: StateKey) -> Result<(), StorageError> {
        let mut guard = self
            .lists
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.remove(&key);
        Ok(())
    }
}

/// Aggregates the state store behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub state: Arc<dyn StateStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            state: Arc::new(InMemoryStateStore::new()),
        }
    }

    #[must_use]
    pub fn json_file(path: impl AsRef<Path>) -> Self {
        Self {
            state: Arc::new(JsonStateStore::new(path)),
        }
    }
}
