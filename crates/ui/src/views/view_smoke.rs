use std::collections::HashMap;

use dioxus::prelude::ReadableExt;
use storage::repository::StateKey;

use super::test_harness::{FakeBank, drive_dom, multi, qid, setup_view_harness, single};
use crate::vm::{QuizIntent, QuizPhase, QuizVm};

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_renders_fetched_questions_and_tracks_progress() {
    let pool = vec![single("1"), multi("2")];
    let mut harness = setup_view_harness(FakeBank::new(pool, HashMap::new()));

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Question 1"), "missing question 1 in {html}");
    assert!(html.contains("A. first"), "missing option text in {html}");
    assert!(html.contains("radio"), "missing radio input in {html}");
    assert!(html.contains("checkbox"), "missing checkbox input in {html}");
    assert!(html.contains("Answered 0 of 2"), "missing progress in {html}");
    assert!(html.contains("Submit Answers"), "missing submit in {html}");

    harness.handles.dispatch().call(QuizIntent::Select {
        id: qid("1"),
        letter: 'A',
    });
    drive_dom(&mut harness.dom);

    let html = harness.render();
    assert!(html.contains("Answered 1 of 2"), "progress not updated in {html}");

    let answered = harness
        .handles
        .vm()
        .read()
        .as_ref()
        .map_or(0, QuizVm::answered_count);
    assert_eq!(answered, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_shows_error_and_retry_when_bank_is_down() {
    let mut harness = setup_view_harness(FakeBank::failing());

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Could not reach the question bank"),
        "missing network message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn submitting_all_correct_renders_score_without_replay_button() {
    let pool = vec![single("1"), multi("2")];
    let key = HashMap::from([
        (qid("1"), "A".to_owned()),
        (qid("2"), "AB".to_owned()),
    ]);
    let mut harness = setup_view_harness(FakeBank::new(pool, key));

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(QuizIntent::Select {
        id: qid("1"),
        letter: 'A',
    });
    // Toggled out of click order; the encoded answer is canonical either way.
    dispatch.call(QuizIntent::Toggle {
        id: qid("2"),
        letter: 'B',
        selected: true,
    });
    dispatch.call(QuizIntent::Toggle {
        id: qid("2"),
        letter: 'A',
        selected: true,
    });
    drive_dom(&mut harness.dom);

    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Score: 2 / 2"), "missing score in {html}");
    assert!(html.contains("Another Round"), "missing next round in {html}");
    assert!(
        !html.contains("Redo Wrong Answers"),
        "replay offered with nothing wrong in {html}"
    );

    let wrong = harness
        .storage
        .state
        .load(StateKey::WrongQuestions)
        .await
        .expect("load wrong ids");
    assert!(wrong.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answers_enable_replay_and_replay_serves_them() {
    let pool = vec![single("1"), single("2")];
    let key = HashMap::from([
        (qid("1"), "A".to_owned()),
        (qid("2"), "A".to_owned()),
    ]);
    let mut harness = setup_view_harness(FakeBank::new(pool, key));

    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let dispatch = harness.handles.dispatch();
    dispatch.call(QuizIntent::Select {
        id: qid("1"),
        letter: 'B',
    });
    dispatch.call(QuizIntent::Select {
        id: qid("2"),
        letter: 'A',
    });
    drive_dom(&mut harness.dom);

    dispatch.call(QuizIntent::Submit);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Score: 1 / 2"), "missing score in {html}");
    assert!(html.contains("Your answer: B"), "missing user answer in {html}");
    assert!(html.contains("Correct answer: A"), "missing key in {html}");
    assert!(html.contains("Explanation 1"), "missing explanation in {html}");
    assert!(html.contains("Redo Wrong Answers"), "missing replay in {html}");

    let wrong = harness
        .storage
        .state
        .load(StateKey::WrongQuestions)
        .await
        .expect("load wrong ids");
    assert_eq!(wrong, vec![qid("1")]);

    dispatch.call(QuizIntent::ReplayWrong);
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Wrong answer replay"),
        "missing replay mode label in {html}"
    );
    assert!(html.contains("Question 1"), "missing replayed question in {html}");
    assert!(
        !html.contains("Question 2"),
        "correctly answered question replayed in {html}"
    );

    let phase = harness.handles.vm().read().as_ref().map(QuizVm::phase);
    assert_eq!(phase, Some(QuizPhase::Answering));
}
