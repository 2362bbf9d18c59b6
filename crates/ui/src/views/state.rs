use dioxus::prelude::*;

use services::QuizError;

/// User-visible load/submit failures. All of them are locally recoverable;
/// none are fatal to the view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    Network,
    Malformed,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Network => "Could not reach the question bank. Please retry.",
            Self::Malformed => "The question bank sent something unexpected.",
            Self::Unknown => "Something went wrong. Please try again.",
        }
    }

    #[must_use]
    pub fn from_quiz_error(err: &QuizError) -> Self {
        if err.is_network() {
            Self::Network
        } else if err.is_malformed() {
            Self::Malformed
        } else {
            Self::Unknown
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
