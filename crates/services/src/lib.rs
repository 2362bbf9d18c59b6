#![forbid(unsafe_code)]

pub mod error;
pub mod question_bank;
pub mod quiz_service;

pub use error::{QuestionBankError, QuizError};
pub use question_bank::{GradedSubmission, HttpQuestionBank, QuestionBank, QuestionBankConfig};
pub use quiz_service::{FRESH_BATCH, QuizService, REPLAY_POOL};
