use std::collections::HashSet;
use std::sync::Arc;

use quiz_core::model::{AnswerSheet, GradeReport, Question, QuestionId};
use quiz_core::selection;
use storage::repository::{StateKey, StateStore};

use crate::error::QuizError;
use crate::question_bank::QuestionBank;

/// How many questions a fresh round asks the bank for, and serves.
pub const FRESH_BATCH: usize = 30;

/// How many questions the replay load pulls before filtering down to the
/// wrong-id list. Larger than a round so previously missed questions have a
/// good chance of being in the pool.
pub const REPLAY_POOL: usize = 100;

/// Orchestrates question loading, grading, and the persisted id lists.
#[derive(Clone)]
pub struct QuizService {
    bank: Arc<dyn QuestionBank>,
    store: Arc<dyn StateStore>,
}

impl QuizService {
    #[must_use]
    pub fn new(bank: Arc<dyn QuestionBank>, store: Arc<dyn StateStore>) -> Self {
        Self { bank, store }
    }

    /// Load a fresh round of questions.
    ///
    /// Fetches a batch, filters out ids already served this session, and
    /// persists the union of old and newly served ids. When fewer than a
    /// full round of unseen questions remain the raw batch is served
    /// instead, repeats included.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for bank or storage failures.
    pub async fn load_fresh(&self) -> Result<Vec<Question>, QuizError> {
        let batch = self.bank.fetch_questions(FRESH_BATCH as u32).await?;
        let seen = self.store.load(StateKey::SessionQuestions).await?;
        let seen_set: HashSet<QuestionId> = seen.iter().cloned().collect();

        let selected = selection::select_fresh(batch, &seen_set, FRESH_BATCH);

        // Union, preserving first-seen order so the persisted list stays
        // stable across rounds.
        let mut merged = seen;
        let mut known = seen_set;
        for question in &selected {
            if known.insert(question.id().clone()) {
                merged.push(question.id().clone());
            }
        }
        self.store.save(StateKey::SessionQuestions, &merged).await?;

        Ok(selected)
    }

    /// Load the replay round: a larger pool filtered down to exactly the
    /// ids missed on the last submission. No session merge or fallback
    /// applies here.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for bank or storage failures.
    pub async fn load_replay(&self) -> Result<Vec<Question>, QuizError> {
        let pool = self.bank.fetch_questions(REPLAY_POOL as u32).await?;
        let wrong: HashSet<QuestionId> = self
            .store
            .load(StateKey::WrongQuestions)
            .await?
            .into_iter()
            .collect();

        Ok(selection::select_replay(pool, &wrong))
    }

    /// Submit the answer sheet for the displayed questions and persist the
    /// new wrong-id list.
    ///
    /// The payload covers every displayed question (empty string for
    /// unanswered ones). Returned feedback is filtered to the displayed ids
    /// and enriched with local question content; the wrong-id list is
    /// replaced wholesale with this submission's incorrect ids.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for bank or storage failures.
    pub async fn submit(
        &self,
        questions: &[Question],
        sheet: &AnswerSheet,
    ) -> Result<GradeReport, QuizError> {
        let payload = sheet.payload_for(questions);
        let graded = self.bank.grade(&payload).await?;
        let report = GradeReport::join(questions, graded.feedback, graded.score, graded.total);

        self.store
            .save(StateKey::WrongQuestions, report.wrong_ids())
            .await?;

        Ok(report)
    }

    /// Forget which questions were served this session, so the next fresh
    /// load treats every id as unseen. The wrong-id list is left alone.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` for storage failures.
    pub async fn reset_session(&self) -> Result<(), QuizError> {
        self.store.clear(StateKey::SessionQuestions).await?;
        Ok(())
    }
}
