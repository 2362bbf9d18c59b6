use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use quiz_core::model::QuestionId;
use storage::json::JsonStateStore;
use storage::repository::{StateKey, StateStore};

static COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_state_path(label: &str) -> PathBuf {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "quiz-state-test-{}-{}-{unique}.json",
        std::process::id(),
        label
    ))
}

fn ids(raw: &[&str]) -> Vec<QuestionId> {
    raw.iter().map(|id| QuestionId::new(*id)).collect()
}

#[tokio::test]
async fn round_trips_both_lists() {
    let path = temp_state_path("roundtrip");
    let store = JsonStateStore::new(&path);

    store
        .save(StateKey::SessionQuestions, &ids(&["1", "2", "3"]))
        .await
        .unwrap();
    store
        .save(StateKey::WrongQuestions, &ids(&["2"]))
        .await
        .unwrap();

    // A second store over the same file sees the persisted lists.
    let reopened = JsonStateStore::new(&path);
    assert_eq!(
        reopened.load(StateKey::SessionQuestions).await.unwrap(),
        ids(&["1", "2", "3"])
    );
    assert_eq!(
        reopened.load(StateKey::WrongQuestions).await.unwrap(),
        ids(&["2"])
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn missing_file_loads_as_empty() {
    let path = temp_state_path("missing");
    let store = JsonStateStore::new(&path);

    assert!(store.load(StateKey::SessionQuestions).await.unwrap().is_empty());
    assert!(store.load(StateKey::WrongQuestions).await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_file_loads_as_empty() {
    let path = temp_state_path("corrupt");
    std::fs::write(&path, b"{not json").unwrap();
    let store = JsonStateStore::new(&path);

    assert!(store.load(StateKey::SessionQuestions).await.unwrap().is_empty());

    // Saving over the corrupt file repairs it.
    store
        .save(StateKey::SessionQuestions, &ids(&["7"]))
        .await
        .unwrap();
    assert_eq!(
        store.load(StateKey::SessionQuestions).await.unwrap(),
        ids(&["7"])
    );

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn clear_preserves_the_other_list() {
    let path = temp_state_path("clear");
    let store = JsonStateStore::new(&path);

    store
        .save(StateKey::SessionQuestions, &ids(&["1"]))
        .await
        .unwrap();
    store
        .save(StateKey::WrongQuestions, &ids(&["9"]))
        .await
        .unwrap();
    store.clear(StateKey::SessionQuestions).await.unwrap();

    assert!(store.load(StateKey::SessionQuestions).await.unwrap().is_empty());
    assert_eq!(
        store.load(StateKey::WrongQuestions).await.unwrap(),
        ids(&["9"])
    );

    let _ = std::fs::remove_file(&path);
}
