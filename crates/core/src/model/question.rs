use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("option text is empty")]
    EmptyOption,
}

/// How a question is answered, derived from the bank's numeric `type` code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    FreeText,
}

impl QuestionKind {
    /// Maps the bank's `type` code: 1 and 3 are radio-style single choice,
    /// 2 is checkbox multi choice, everything else is a free-text fill-in.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 | 3 => Self::SingleChoice,
            2 => Self::MultiChoice,
            _ => Self::FreeText,
        }
    }

    #[must_use]
    pub fn is_choice(self) -> bool {
        matches!(self, Self::SingleChoice | Self::MultiChoice)
    }
}

/// One selectable option line. The bank sends options as plain strings whose
/// first character is the letter label (e.g. `"A. Lorem"`); the full line is
/// kept for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    letter: char,
    text: String,
}

impl ChoiceOption {
    /// Parse an option from its wire form.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyOption` if the line has no characters.
    pub fn parse(raw: &str) -> Result<Self, QuestionError> {
        let mut chars = raw.chars();
        let letter = chars.next().ok_or(QuestionError::EmptyOption)?;
        Ok(Self {
            letter,
            text: raw.to_owned(),
        })
    }

    #[must_use]
    pub fn letter(&self) -> char {
        self.letter
    }

    /// The full option line, label included.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A question as served by the bank, ready to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    title: String,
    kind: QuestionKind,
    options: Vec<ChoiceOption>,
    explanation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: QuestionId,
        title: impl Into<String>,
        kind: QuestionKind,
        options: Vec<ChoiceOption>,
        explanation: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            options,
            explanation,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> QuestionKind {
        self.kind
    }

    #[must_use]
    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }
}
