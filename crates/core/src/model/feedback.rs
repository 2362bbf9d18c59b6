use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;
use crate::model::question::{ChoiceOption, Question};

/// Per-question grading result as returned by the bank.
///
/// Carries no display content beyond the answers themselves; options and
/// explanation are joined back in from the locally held question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: QuestionId,
    pub title: String,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
}

/// A feedback item enriched with the displayed question's options and
/// explanation, ready to render on the results view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewItem {
    pub feedback: FeedbackItem,
    pub options: Vec<ChoiceOption>,
    pub explanation: Option<String>,
}

/// The graded outcome of one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradeReport {
    score: u32,
    total: u32,
    items: Vec<ReviewItem>,
    wrong_ids: Vec<QuestionId>,
}

impl GradeReport {
    /// Join raw feedback against the currently displayed questions.
    ///
    /// Feedback entries whose id is not in `questions` are dropped; the bank
    /// grades its whole pool and may return items for questions that were
    /// never shown. `wrong_ids` collects exactly the surviving items with
    /// `correct == false`.
    #[must_use]
    pub fn join(
        questions: &[Question],
        feedback: Vec<FeedbackItem>,
        score: u32,
        total: u32,
    ) -> Self {
        let by_id: HashMap<&QuestionId, &Question> =
            questions.iter().map(|q| (q.id(), q)).collect();

        let items: Vec<ReviewItem> = feedback
            .into_iter()
            .filter_map(|fb| {
                by_id.get(&fb.id).map(|question| ReviewItem {
                    options: question.options().to_vec(),
                    explanation: question.explanation().map(str::to_owned),
                    feedback: fb,
                })
            })
            .collect();

        let wrong_ids = items
            .iter()
            .filter(|item| !item.feedback.correct)
            .map(|item| item.feedback.id.clone())
            .collect();

        Self {
            score,
            total,
            items,
            wrong_ids,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn items(&self) -> &[ReviewItem] {
        &self.items
    }

    /// Ids answered incorrectly on this submission, in feedback order.
    #[must_use]
    pub fn wrong_ids(&self) -> &[QuestionId] {
        &self.wrong_ids
    }

    #[must_use]
    pub fn has_wrong(&self) -> bool {
        !self.wrong_ids.is_empty()
    }
}
