use std::collections::BTreeMap;
use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use quiz_core::model::{ChoiceOption, FeedbackItem, Question, QuestionId, QuestionKind};

use crate::error::QuestionBankError;

/// Where the question bank lives.
///
/// One base URL serves all three calls (fresh fetch, replay fetch,
/// submission); the endpoints are fixed paths under it.
#[derive(Clone, Debug)]
pub struct QuestionBankConfig {
    pub base_url: String,
}

impl QuestionBankConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("QUIZ_BANK_URL").unwrap_or_else(|_| "http://localhost:5000".into());
        Self { base_url }
    }
}

/// Everything the bank graded for one submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GradedSubmission {
    pub score: u32,
    pub total: u32,
    pub feedback: Vec<FeedbackItem>,
}

/// The external question bank, reachable through two endpoints.
#[async_trait]
pub trait QuestionBank: Send + Sync {
    /// Request a batch of up to `count` questions.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` when the request fails or a question
    /// cannot be understood.
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, QuestionBankError>;

    /// Submit a full answer map (one entry per displayed question id) for
    /// grading.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError` when the request fails or the response
    /// cannot be understood.
    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, String>,
    ) -> Result<GradedSubmission, QuestionBankError>;
}

/// HTTP client for the question bank.
#[derive(Clone)]
pub struct HttpQuestionBank {
    client: Client,
    config: QuestionBankConfig,
}

impl HttpQuestionBank {
    #[must_use]
    pub fn new(config: QuestionBankConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(QuestionBankConfig::from_env())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl QuestionBank for HttpQuestionBank {
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, QuestionBankError> {
        let response = self
            .client
            .get(self.endpoint("get-questions"))
            .query(&[("count", count)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionBankError::HttpStatus(response.status()));
        }

        let body: Vec<QuestionDto> = response.json().await?;
        body.into_iter().map(QuestionDto::into_question).collect()
    }

    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, String>,
    ) -> Result<GradedSubmission, QuestionBankError> {
        let response = self
            .client
            .post(self.endpoint("submit-answers"))
            .json(answers)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(QuestionBankError::HttpStatus(response.status()));
        }

        let body: GradeResponseDto = response.json().await?;
        Ok(GradedSubmission {
            score: body.score,
            total: body.total,
            feedback: body.feedback,
        })
    }
}

#[derive(Debug, Deserialize)]
struct QuestionDto {
    id: QuestionId,
    title: String,
    #[serde(rename = "type")]
    kind_code: i64,
    #[serde(default)]
    options: Vec<String>,
    #[serde(default)]
    explanation: Option<String>,
}

impl QuestionDto {
    fn into_question(self) -> Result<Question, QuestionBankError> {
        let options = self
            .options
            .iter()
            .map(|raw| ChoiceOption::parse(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| QuestionBankError::MalformedQuestion {
                id: self.id.clone(),
                source,
            })?;

        // The bank pads explanations with empty strings; treat those as absent.
        let explanation = self
            .explanation
            .filter(|text| !text.trim().is_empty());

        Ok(Question::new(
            self.id,
            self.title,
            QuestionKind::from_code(self.kind_code),
            options,
            explanation,
        ))
    }
}

#[derive(Debug, Deserialize)]
struct GradeResponseDto {
    score: u32,
    total: u32,
    feedback: Vec<FeedbackItem>,
}
