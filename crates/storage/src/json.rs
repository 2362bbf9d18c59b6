use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::QuestionId;
use serde::{Deserialize, Serialize};

use crate::repository::{StateKey, StateStore, StorageError};

/// On-disk shape of the persisted state: one small JSON document holding
/// both id lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    session_question_ids: Vec<QuestionId>,
    #[serde(default)]
    wrong_question_ids: Vec<QuestionId>,
}

impl StateFile {
    fn list(&self, key: StateKey) -> &Vec<QuestionId> {
        match key {
            StateKey::SessionQuestions => &self.session_question_ids,
            StateKey::WrongQuestions => &self.wrong_question_ids,
        }
    }

    fn list_mut(&mut self, key: StateKey) -> &mut Vec<QuestionId> {
        match key {
            StateKey::SessionQuestions => &mut self.session_question_ids,
            StateKey::WrongQuestions => &mut self.wrong_question_ids,
        }
    }
}

/// JSON-file-backed state store.
///
/// A missing or unparseable file loads as the empty default instead of
/// failing, so corrupted local state degrades to "nothing seen yet" rather
/// than breaking the app. Every save rewrites the whole document.
#[derive(Clone)]
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_state(&self) -> StateFile {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_default(),
            Err(_) => StateFile::default(),
        }
    }

    async fn write_state(&self, state: &StateFile) -> Result<(), StorageError> {
        let raw = serde_json::to_vec_pretty(state)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Io(e.to_string()))?;
            }
        }
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load(&self, key: StateKey) -> Result<Vec<QuestionId>, StorageError> {
        Ok(self.read_state().await.list(key).clone())
    }

    async fn save(&self, key: StateKey, ids: &[QuestionId]) -> Result<(), StorageError> {
        let mut state = self.read_state().await;
        *state.list_mut(key) = ids.to_vec();
        self.write_state(&state).await
    }

    async fn clear(&self, key: StateKey) -> Result<(), StorageError> {
        let mut state = self.read_state().await;
        state.list_mut(key).clear();
        self.write_state(&state).await
    }
}
