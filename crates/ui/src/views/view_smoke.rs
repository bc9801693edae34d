use std::sync::Arc;

use quiz_core::model::{LeaderboardEntry, Question};
use quiz_core::time::fixed_now;
use storage::{QuestionRepository, Storage, StorageError};

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with_repo};

async fn settle(harness: &mut ViewHarness) -> String {
    harness.rebuild();
    for _ in 0..3 {
        harness.drive_async().await;
    }
    harness.render()
}

async fn seed_series(storage: &Storage, name: &str) {
    let questions = vec![
        Question::new("Capital of Italy?", ["Rome", "Milan", "Turin", "Naples"], 0).unwrap(),
        Question::new("Capital of Spain?", ["Seville", "Madrid", "Valencia", "Bilbao"], 1)
            .unwrap(),
    ];
    storage.questions.save_series(name, &questions).await.unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_menu() {
    let mut harness = setup_view_harness(ViewKind::Home);
    let html = settle(&mut harness).await;
    for label in ["Create Question Series", "Play Quiz", "Show Leaderboard", "Exit"] {
        assert!(html.contains(label), "missing {label} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn author_view_smoke_starts_with_name_prompt() {
    let mut harness = setup_view_harness(ViewKind::Author);
    let html = settle(&mut harness).await;
    assert!(html.contains("Series name"), "missing name prompt in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn select_view_smoke_lists_series() {
    let mut harness = setup_view_harness(ViewKind::Select);
    seed_series(&harness.storage, "Capitals").await;
    let html = settle(&mut harness).await;
    assert!(html.contains("Capitals"), "missing series in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn select_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Select);
    let html = settle(&mut harness).await;
    assert!(html.contains("No question series yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_question() {
    let mut harness = setup_view_harness(ViewKind::Quiz("Capitals".into()));
    seed_series(&harness.storage, "Capitals").await;
    let html = settle(&mut harness).await;
    assert!(html.contains("Capitals"), "missing series title in {html}");
    assert!(html.contains("Capital of Italy?"), "missing question in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");
    assert!(html.contains("Madrid") || html.contains("Rome"), "missing choices in {html}");
    assert!(html.contains("Time left:"), "missing timer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reports_missing_series() {
    let mut harness = setup_view_harness(ViewKind::Quiz("Ghost".into()));
    let html = settle(&mut harness).await;
    assert!(
        html.contains("That question series no longer exists."),
        "missing not-found message in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_ranked_rows() {
    let mut harness = setup_view_harness(ViewKind::Leaderboard);
    for (name, score) in [("zoe", 1), ("yan", 4)] {
        harness
            .storage
            .questions
            .append_score(&LeaderboardEntry::new(name, score, None, fixed_now()))
            .await
            .unwrap();
    }
    let html = settle(&mut harness).await;
    let yan = html.find("yan").expect("yan rendered");
    let zoe = html.find("zoe").expect("zoe rendered");
    assert!(yan < zoe, "higher score should come first in {html}");
}

struct FailingRepo;

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn save_series(&self, _name: &str, _questions: &[Question]) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_series_names(&self) -> Result<Vec<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn load_series(&self, _name: &str) -> Result<Vec<Question>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn append_score(&self, _entry: &LeaderboardEntry) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn load_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_smoke_renders_error_state() {
    let storage = Storage::from_repository(Arc::new(FailingRepo));
    let mut harness = setup_view_harness_with_repo(ViewKind::Leaderboard, storage);
    let html = settle(&mut harness).await;
    assert!(
        html.contains("Could not reach the question store."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
}
