use std::collections::BTreeMap;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

/// Toggle a letter inside a multi-choice answer string.
///
/// The result is always sorted and deduplicated, so equivalent selections
/// serialize identically no matter what order the user clicked in. The bank
/// grades by string equality, which makes this canonical form load-bearing.
#[must_use]
pub fn toggle_letter(current: &str, letter: char, selected: bool) -> String {
    let mut letters: Vec<char> = current.chars().filter(|c| *c != letter).collect();
    if selected {
        letters.push(letter);
    }
    letters.sort_unstable();
    letters.dedup();
    letters.into_iter().collect()
}

/// In-progress answers for the currently rendered question set.
///
/// Values are keyed by question id: a single letter for single choice, a
/// sorted-deduplicated letter string for multi choice, verbatim text for
/// free-text questions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    values: BTreeMap<QuestionId, String>,
}

impl AnswerSheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Single choice: the last selection wins.
    pub fn select(&mut self, id: &QuestionId, letter: char) {
        self.values.insert(id.clone(), letter.to_string());
    }

    /// Multi choice: add or remove one letter from the stored string.
    pub fn toggle(&mut self, id: &QuestionId, letter: char, selected: bool) {
        let current = self.value(id).to_owned();
        self.values
            .insert(id.clone(), toggle_letter(&current, letter, selected));
    }

    /// Free text, stored verbatim.
    pub fn set_text(&mut self, id: &QuestionId, text: impl Into<String>) {
        self.values.insert(id.clone(), text.into());
    }

    /// The stored value for a question, or `""` if untouched.
    #[must_use]
    pub fn value(&self, id: &QuestionId) -> &str {
        self.values.get(id).map_or("", String::as_str)
    }

    /// Number of questions with a non-empty answer, for the progress label.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.values.iter().filter(|(_, v)| !v.is_empty()).count()
    }

    /// Build the submission payload covering every displayed question.
    ///
    /// Exactly one entry per question id, defaulting to `""` for unanswered
    /// ones so the bank always receives a full schema. Values stored for ids
    /// outside `questions` (stale batches) are dropped here.
    #[must_use]
    pub fn payload_for(&self, questions: &[Question]) -> BTreeMap<QuestionId, String> {
        questions
            .iter()
            .map(|q| (q.id().clone(), self.value(q.id()).to_owned()))
            .collect()
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}
