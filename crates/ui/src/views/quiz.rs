#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use quiz_core::model::{QuestionId, QuestionKind};

use crate::context::AppContext;
use crate::views::state::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionRowVm, QuestionRowVm, QuizIntent, QuizMode, QuizPhase, QuizVm, ReviewRowVm, load_quiz};

/// What to retry when the user hits the Retry button.
#[derive(Clone, Copy, PartialEq, Eq)]
enum LastAction {
    Load,
    Submit,
    Reset,
}

#[component]
pub fn QuizView() -> Element {
    let context = use_context::<AppContext>();
    let quiz_service = context.quiz_service();

    let mode = use_signal(|| QuizMode::Fresh);
    let vm: Signal<Option<QuizVm>> = use_signal(|| None);
    let action_error: Signal<Option<ViewError>> = use_signal(|| None);
    let last_action: Signal<Option<LastAction>> = use_signal(|| None);

    let service_for_resource = quiz_service.clone();
    let resource = use_resource(move || {
        let service = service_for_resource.clone();
        let requested = mode();
        let mut vm = vm;
        let mut action_error = action_error;
        let mut last_action = last_action;

        async move {
            last_action.set(Some(LastAction::Load));
            let loaded = load_quiz(&service, requested).await?;
            vm.set(Some(loaded));
            action_error.set(None);
            Ok::<_, ViewError>(())
        }
    });

    let state = view_state_from_resource(&resource);

    let dispatch_intent = {
        let quiz_service = quiz_service.clone();
        use_callback(move |intent: QuizIntent| {
            let mut vm = vm;
            let mut action_error = action_error;
            let mut last_action = last_action;
            let mut mode = mode;
            let mut resource = resource;

            match intent {
                QuizIntent::Select { id, letter } => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.select(&id, letter);
                    }
                }
                QuizIntent::Toggle {
                    id,
                    letter,
                    selected,
                } => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.toggle(&id, letter, selected);
                    }
                }
                QuizIntent::Input { id, text } => {
                    if let Some(vm) = vm.write().as_mut() {
                        vm.input(&id, text);
                    }
                }
                QuizIntent::Submit => {
                    let service = quiz_service.clone();
                    spawn(async move {
                        last_action.set(Some(LastAction::Submit));
                        let taken = {
                            let mut guard = vm.write();
                            guard.take()
                        };

                        let Some(mut current) = taken else {
                            action_error.set(Some(ViewError::Unknown));
                            return;
                        };

                        let result = current.submit(&service).await;

                        // Always put the round back so the UI remains usable
                        // even after errors.
                        {
                            let mut guard = vm.write();
                            *guard = Some(current);
                        }

                        match result {
                            Ok(()) => action_error.set(None),
                            Err(err) => action_error.set(Some(err)),
                        }
                    });
                }
                QuizIntent::ReplayWrong => {
                    if mode() == QuizMode::Replay {
                        resource.restart();
                    } else {
                        mode.set(QuizMode::Replay);
                    }
                }
                QuizIntent::ResetSession => {
                    let service = quiz_service.clone();
                    spawn(async move {
                        last_action.set(Some(LastAction::Reset));
                        match service.reset_session().await {
                            Ok(()) => {
                                action_error.set(None);
                                if mode() == QuizMode::Fresh {
                                    resource.restart();
                                } else {
                                    mode.set(QuizMode::Fresh);
                                }
                            }
                            Err(err) => {
                                action_error.set(Some(ViewError::from_quiz_error(&err)));
                            }
                        }
                    });
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, vm);
            }
        }
    }

    let retry_action = use_callback(move |()| match last_action() {
        Some(LastAction::Load) | None => {
            let mut resource = resource;
            resource.restart();
        }
        Some(LastAction::Submit) => {
            dispatch_intent.call(QuizIntent::Submit);
        }
        Some(LastAction::Reset) => {
            dispatch_intent.call(QuizIntent::ResetSession);
        }
    });

    let on_next_round = use_callback(move |()| {
        if mode() == QuizMode::Fresh {
            let mut resource = resource;
            resource.restart();
        } else {
            let mut mode = mode;
            mode.set(QuizMode::Fresh);
        }
    });

    let phase = vm.read().as_ref().map(QuizVm::phase);
    let question_rows = vm
        .read()
        .as_ref()
        .map(QuizVm::question_rows)
        .unwrap_or_default();
    let has_questions = !question_rows.is_empty();
    let review_rows = vm
        .read()
        .as_ref()
        .map(QuizVm::review_rows)
        .unwrap_or_default();
    let score_label = vm
        .read()
        .as_ref()
        .and_then(QuizVm::score_label)
        .unwrap_or_default();
    let wrong_count = vm.read().as_ref().map_or(0, QuizVm::wrong_count);
    let progress_label = vm.read().as_ref().map_or_else(String::new, |vm| {
        format!("Answered {} of {}", vm.answered_count(), vm.total())
    });
    let mode_label = match mode() {
        QuizMode::Fresh => "New questions",
        QuizMode::Replay => "Wrong answer replay",
    };
    let empty_message = match mode() {
        QuizMode::Fresh => "No questions available right now.",
        QuizMode::Replay => "No wrong answers recorded. Nice work.",
    };

    rsx! {
        div { class: "page quiz-page",
            header { class: "quiz-header",
                h2 { class: "quiz-header__title", "Quiz Drill" }
                p { class: "quiz-header__mode", "{mode_label}" }
            }
            div { class: "quiz-body",
                match state {
                    ViewState::Idle => rsx! {
                        p { "Idle" }
                    },
                    ViewState::Loading => rsx! {
                        p { "Loading..." }
                    },
                    ViewState::Error(err) => rsx! {
                        p { class: "quiz-error", "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            id: "quiz-retry",
                            r#type: "button",
                            onclick: move |_| retry_action.call(()),
                            "Retry"
                        }
                    },
                    ViewState::Ready(()) => rsx! {
                        if let Some(err) = *action_error.read() {
                            p { class: "quiz-error", "{err.message()}" }
                            button {
                                class: "btn btn-secondary",
                                id: "quiz-retry",
                                r#type: "button",
                                onclick: move |_| retry_action.call(()),
                                "Retry"
                            }
                        }
                        match phase {
                            Some(QuizPhase::Answering) => rsx! {
                                if has_questions {
                                    div { class: "quiz-questions",
                                        for row in question_rows {
                                            QuestionCard { row, on_intent: dispatch_intent }
                                        }
                                    }
                                    footer { class: "quiz-footer",
                                        span { class: "quiz-footer__progress", "{progress_label}" }
                                        button {
                                            class: "quiz-submit",
                                            id: "quiz-submit",
                                            r#type: "button",
                                            onclick: move |_| dispatch_intent.call(QuizIntent::Submit),
                                            "Submit Answers"
                                        }
                                    }
                                } else {
                                    p { class: "quiz-empty", "{empty_message}" }
                                    if mode() == QuizMode::Replay {
                                        button {
                                            class: "btn btn-secondary",
                                            id: "quiz-back-to-fresh",
                                            r#type: "button",
                                            onclick: move |_| on_next_round.call(()),
                                            "Back to New Questions"
                                        }
                                    }
                                }
                            },
                            Some(QuizPhase::Reviewing) => rsx! {
                                div { class: "quiz-result",
                                    h3 { class: "quiz-result__score", "{score_label}" }
                                    div { class: "quiz-reviews",
                                        for row in review_rows {
                                            ReviewCard { row }
                                        }
                                    }
                                    div { class: "quiz-result__actions",
                                        button {
                                            class: "btn btn-primary",
                                            id: "quiz-next-round",
                                            r#type: "button",
                                            onclick: move |_| on_next_round.call(()),
                                            "Another Round"
                                        }
                                        if wrong_count > 0 {
                                            button {
                                                class: "btn btn-secondary",
                                                id: "quiz-replay-wrong",
                                                r#type: "button",
                                                onclick: move |_| dispatch_intent.call(QuizIntent::ReplayWrong),
                                                "Redo Wrong Answers"
                                            }
                                        }
                                        button {
                                            class: "btn btn-ghost",
                                            id: "quiz-reset-session",
                                            r#type: "button",
                                            onclick: move |_| dispatch_intent.call(QuizIntent::ResetSession),
                                            "Reset Session"
                                        }
                                    }
                                }
                            },
                            None => rsx! {},
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionCard(row: QuestionRowVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let multi = row.kind == QuestionKind::MultiChoice;
    let group = format!("question-{}", row.id);
    let text_id = row.id.clone();

    rsx! {
        section { class: "question-card",
            h3 { class: "question-card__title", "{row.number}. {row.title}" }
            if row.kind.is_choice() {
                div { class: "question-card__options",
                    for option in row.options {
                        OptionInput {
                            question_id: row.id.clone(),
                            group: group.clone(),
                            multi,
                            option,
                            on_intent,
                        }
                    }
                }
            } else {
                input {
                    class: "question-card__text",
                    r#type: "text",
                    placeholder: "Type your answer",
                    value: "{row.text_value}",
                    oninput: move |evt: FormEvent| {
                        on_intent.call(QuizIntent::Input {
                            id: text_id.clone(),
                            text: evt.value(),
                        });
                    },
                }
            }
        }
    }
}

#[component]
fn OptionInput(
    question_id: QuestionId,
    group: String,
    multi: bool,
    option: OptionRowVm,
    on_intent: EventHandler<QuizIntent>,
) -> Element {
    let input_type = if multi { "checkbox" } else { "radio" };
    let checked = option.checked;
    let letter = option.letter;

    rsx! {
        label { class: "question-card__option",
            input {
                r#type: "{input_type}",
                name: "{group}",
                checked,
                onclick: move |_| {
                    let id = question_id.clone();
                    if multi {
                        on_intent.call(QuizIntent::Toggle {
                            id,
                            letter,
                            selected: !checked,
                        });
                    } else {
                        on_intent.call(QuizIntent::Select { id, letter });
                    }
                },
            }
            span { class: "question-card__option-text", "{option.text}" }
        }
    }
}

#[component]
fn ReviewCard(row: ReviewRowVm) -> Element {
    let (card_class, verdict) = if row.correct {
        ("review-card review-card--correct", "Correct")
    } else {
        ("review-card review-card--wrong", "Wrong")
    };
    let user_answer = if row.user_answer.is_empty() {
        "(no answer)".to_owned()
    } else {
        row.user_answer.clone()
    };

    rsx! {
        section { class: "{card_class}",
            h3 { class: "review-card__title", "{row.number}. {row.title}" }
            if !row.options.is_empty() {
                ul { class: "review-card__options",
                    for text in row.options {
                        li { "{text}" }
                    }
                }
            }
            p { class: "review-card__line", "Your answer: {user_answer}" }
            p { class: "review-card__line", "Correct answer: {row.correct_answer}" }
            p { class: "review-card__verdict", "{verdict}" }
            if let Some(explanation) = row.explanation {
                p { class: "review-card__explanation", "{explanation}" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    vm: Rc<RefCell<Option<Signal<Option<QuizVm>>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, vm: Signal<Option<QuizVm>>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<Option<QuizVm>> {
        (*self.vm.borrow()).expect("quiz vm registered")
    }
}
