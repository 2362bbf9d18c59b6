use quiz_core::model::{AnswerSheet, GradeReport, Question, QuestionId, QuestionKind};
use services::QuizService;

use crate::views::ViewError;

/// Which pool the next load draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizMode {
    Fresh,
    Replay,
}

/// Answering (no result yet) vs. reviewing (result present).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Answering,
    Reviewing,
}

/// User actions the quiz view dispatches.
#[derive(Clone, Debug, PartialEq)]
pub enum QuizIntent {
    Select { id: QuestionId, letter: char },
    Toggle { id: QuestionId, letter: char, selected: bool },
    Input { id: QuestionId, text: String },
    Submit,
    ReplayWrong,
    ResetSession,
}

/// One question block ready to render as form inputs.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRowVm {
    pub id: QuestionId,
    pub number: usize,
    pub title: String,
    pub kind: QuestionKind,
    pub options: Vec<OptionRowVm>,
    pub text_value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionRowVm {
    pub letter: char,
    pub text: String,
    pub checked: bool,
}

/// One graded question ready to render on the results view.
#[derive(Clone, Debug, PartialEq)]
pub struct ReviewRowVm {
    pub number: usize,
    pub title: String,
    pub options: Vec<String>,
    pub user_answer: String,
    pub correct_answer: String,
    pub correct: bool,
    pub explanation: Option<String>,
}

/// State of one quiz round: the displayed questions, the in-progress answer
/// sheet, and (after submission) the grade report.
pub struct QuizVm {
    mode: QuizMode,
    questions: Vec<Question>,
    sheet: AnswerSheet,
    report: Option<GradeReport>,
}

impl QuizVm {
    #[must_use]
    pub fn new(mode: QuizMode, questions: Vec<Question>) -> Self {
        Self {
            mode,
            questions,
            sheet: AnswerSheet::new(),
            report: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.report.is_some() {
            QuizPhase::Reviewing
        } else {
            QuizPhase::Answering
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.sheet.answered_count()
    }

    pub fn select(&mut self, id: &QuestionId, letter: char) {
        if self.phase() == QuizPhase::Answering {
            self.sheet.select(id, letter);
        }
    }

    pub fn toggle(&mut self, id: &QuestionId, letter: char, selected: bool) {
        if self.phase() == QuizPhase::Answering {
            self.sheet.toggle(id, letter, selected);
        }
    }

    pub fn input(&mut self, id: &QuestionId, text: String) {
        if self.phase() == QuizPhase::Answering {
            self.sheet.set_text(id, text);
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&GradeReport> {
        self.report.as_ref()
    }

    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.report.as_ref().map_or(0, |r| r.wrong_ids().len())
    }

    /// Grade the current sheet and switch to reviewing.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` for service failures; the vm stays in answering
    /// phase so the user can retry.
    pub async fn submit(&mut self, service: &QuizService) -> Result<(), ViewError> {
        let report = service
            .submit(&self.questions, &self.sheet)
            .await
            .map_err(|e| ViewError::from_quiz_error(&e))?;
        self.report = Some(report);
        Ok(())
    }

    #[must_use]
    pub fn question_rows(&self) -> Vec<QuestionRowVm> {
        self.questions
            .iter()
            .enumerate()
            .map(|(index, question)| {
                let value = self.sheet.value(question.id());
                QuestionRowVm {
                    id: question.id().clone(),
                    number: index + 1,
                    title: question.title().to_owned(),
                    kind: question.kind(),
                    options: question
                        .options()
                        .iter()
                        .map(|option| OptionRowVm {
                            letter: option.letter(),
                            text: option.text().to_owned(),
                            checked: value.contains(option.letter()),
                        })
                        .collect(),
                    text_value: value.to_owned(),
                }
            })
            .collect()
    }

    #[must_use]
    pub fn review_rows(&self) -> Vec<ReviewRowVm> {
        let Some(report) = self.report.as_ref() else {
            return Vec::new();
        };
        report
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| ReviewRowVm {
                number: index + 1,
                title: item.feedback.title.clone(),
                options: item.options.iter().map(|o| o.text().to_owned()).collect(),
                user_answer: item.feedback.user_answer.clone(),
                correct_answer: item.feedback.correct_answer.clone(),
                correct: item.feedback.correct,
                explanation: item.explanation.clone(),
            })
            .collect()
    }

    #[must_use]
    pub fn score_label(&self) -> Option<String> {
        self.report
            .as_ref()
            .map(|r| format!("Score: {} / {}", r.score(), r.total()))
    }
}

/// Load questions for the given mode and wrap them in a fresh vm.
///
/// (Re)loading always starts with an empty sheet and no report.
///
/// # Errors
///
/// Returns `ViewError` for bank or storage failures.
pub async fn load_quiz(service: &QuizService, mode: QuizMode) -> Result<QuizVm, ViewError> {
    let questions = match mode {
        QuizMode::Fresh => service.load_fresh().await,
        QuizMode::Replay => service.load_replay().await,
    }
    .map_err(|e| ViewError::from_quiz_error(&e))?;

    Ok(QuizVm::new(mode, questions))
}
