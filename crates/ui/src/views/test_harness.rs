use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{ChoiceOption, FeedbackItem, Question, QuestionId, QuestionKind};
use services::{GradedSubmission, QuestionBank, QuestionBankError, QuizService};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::QuizView;
use crate::views::quiz::QuizTestHandles;

/// Scripted stand-in for the HTTP bank. Serves a fixed pool and grades by
/// string equality against the answer key, the same way the real bank does.
pub struct FakeBank {
    pool: Vec<Question>,
    key: HashMap<QuestionId, String>,
    fail_fetch: bool,
}

impl FakeBank {
    pub fn new(pool: Vec<Question>, key: HashMap<QuestionId, String>) -> Self {
        Self {
            pool,
            key,
            fail_fetch: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            pool: Vec::new(),
            key: HashMap::new(),
            fail_fetch: true,
        }
    }
}

#[async_trait]
impl QuestionBank for FakeBank {
    async fn fetch_questions(&self, count: u32) -> Result<Vec<Question>, QuestionBankError> {
        if self.fail_fetch {
            return Err(QuestionBankError::HttpStatus(
                reqwest::StatusCode::BAD_GATEWAY,
            ));
        }
        Ok(self.pool.iter().take(count as usize).cloned().collect())
    }

    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, String>,
    ) -> Result<GradedSubmission, QuestionBankError> {
        let mut score = 0;
        let feedback = answers
            .iter()
            .map(|(id, user_answer)| {
                let correct_answer = self.key.get(id).cloned().unwrap_or_default();
                let correct = !correct_answer.is_empty() && *user_answer == correct_answer;
                if correct {
                    score += 1;
                }
                let title = self
                    .pool
                    .iter()
                    .find(|q| q.id() == id)
                    .map_or_else(String::new, |q| q.title().to_owned());
                FeedbackItem {
                    id: id.clone(),
                    title,
                    user_answer: user_answer.clone(),
                    correct_answer,
                    correct,
                }
            })
            .collect::<Vec<_>>();

        Ok(GradedSubmission {
            score,
            total: answers.len() as u32,
            feedback,
        })
    }
}

pub fn qid(id: &str) -> QuestionId {
    QuestionId::new(id)
}

pub fn single(id: &str) -> Question {
    Question::new(
        qid(id),
        format!("Question {id}"),
        QuestionKind::SingleChoice,
        vec![
            ChoiceOption::parse("A. first").unwrap(),
            ChoiceOption::parse("B. second").unwrap(),
        ],
        Some(format!("Explanation {id}")),
    )
}

pub fn multi(id: &str) -> Question {
    Question::new(
        qid(id),
        format!("Question {id}"),
        QuestionKind::MultiChoice,
        vec![
            ChoiceOption::parse("A. first").unwrap(),
            ChoiceOption::parse("B. second").unwrap(),
            ChoiceOption::parse("C. third").unwrap(),
        ],
        None,
    )
}

struct TestApp {
    quiz_service: Arc<QuizService>,
}

impl UiApp for TestApp {
    fn quiz_service(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz_service)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(bank: FakeBank) -> ViewHarness {
    let storage = Storage::in_memory();
    let quiz_service = Arc::new(QuizService::new(Arc::new(bank), Arc::clone(&storage.state)));
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { quiz_service });

    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        handles,
    }
}
