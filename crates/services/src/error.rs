//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuestionError, QuestionId};
use storage::repository::StorageError;

/// Errors emitted by the question-bank client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("question bank request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed question {id}: {source}")]
    MalformedQuestion {
        id: QuestionId,
        source: QuestionError,
    },
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error(transparent)]
    Bank(#[from] QuestionBankError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl QuizError {
    /// True when the fetch/submit did not complete or was refused, i.e. the
    /// same request is worth retrying.
    #[must_use]
    pub fn is_network(&self) -> bool {
        match self {
            Self::Bank(QuestionBankError::HttpStatus(_)) => true,
            Self::Bank(QuestionBankError::Http(e)) => !e.is_decode(),
            _ => false,
        }
    }

    /// True when the bank answered but the payload could not be understood.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        match self {
            Self::Bank(QuestionBankError::MalformedQuestion { .. }) => true,
            Self::Bank(QuestionBankError::Http(e)) => e.is_decode(),
            _ => false,
        }
    }
}
