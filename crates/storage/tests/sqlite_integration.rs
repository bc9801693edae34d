mod common;

use common::{entry, exercise_contract, question};
use storage::sqlite::SqliteRepository;
use storage::{QuestionRepository, Storage};

#[tokio::test]
async fn sqlite_satisfies_repository_contract() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_contract?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    exercise_contract(&repo).await;
    repo.close().await;
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    repo.save_series("Once", &[question("Q", 0)]).await.unwrap();
    assert_eq!(repo.list_series_names().await.unwrap(), vec!["Once".to_string()]);
}

#[tokio::test]
async fn sqlite_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("quiz.sqlite3").display());

    let storage = Storage::sqlite(&url).await.expect("open");
    storage
        .questions
        .save_series("Kept", &[question("Q1", 2), question("Q2", 1)])
        .await
        .unwrap();
    storage
        .questions
        .append_score(&entry("alice", 2, Some("Kept")))
        .await
        .unwrap();
    storage.close().await;

    let reopened = Storage::sqlite(&url).await.expect("reopen");
    let questions = reopened.questions.load_series("Kept").await.unwrap();
    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].text(), "Q1");
    assert_eq!(questions[1].correct_choice(), 1);

    let board = reopened.questions.load_leaderboard().await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].username, "alice");
    reopened.close().await;
}
