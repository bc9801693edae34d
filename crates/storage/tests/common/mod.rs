use quiz_core::model::{LeaderboardEntry, Question};
use quiz_core::time::fixed_now;
use storage::{QuestionRepository, StorageError};

pub fn question(text: &str, correct: usize) -> Question {
    Question::new(
        text,
        [format!("{text}-a"), format!("{text}-b"), format!("{text}-c"), format!("{text}-d")],
        correct,
    )
    .unwrap()
}

pub fn entry(name: &str, score: u32, series: Option<&str>) -> LeaderboardEntry {
    LeaderboardEntry::new(name, score, series.map(str::to_owned), fixed_now())
}

/// Behaviour every backend has to share.
pub async fn exercise_contract(repo: &dyn QuestionRepository) {
    assert!(repo.list_series_names().await.unwrap().is_empty());
    assert!(repo.load_leaderboard().await.unwrap().is_empty());

    let capitals = vec![question("France", 1), question("Italy", 0), question("Norway", 3)];
    repo.save_series("Capitals", &capitals).await.unwrap();
    repo.save_series("Rust", &[question("Borrow", 2)]).await.unwrap();

    assert_eq!(
        repo.list_series_names().await.unwrap(),
        vec!["Capitals".to_string(), "Rust".to_string()]
    );
    assert_eq!(repo.load_series("Capitals").await.unwrap(), capitals);

    let err = repo.save_series("Capitals", &capitals).await.unwrap_err();
    assert!(matches!(err, StorageError::Conflict), "got {err:?}");
    assert!(matches!(
        repo.load_series("Missing").await.unwrap_err(),
        StorageError::NotFound
    ));
    assert!(matches!(
        repo.append_score(&entry("ghost", 1, Some("Missing")))
            .await
            .unwrap_err(),
        StorageError::NotFound
    ));

    for (name, score) in [("a", 5), ("b", 9), ("c", 9), ("d", 3)] {
        repo.append_score(&entry(name, score, Some("Capitals")))
            .await
            .unwrap();
    }
    let board = repo.load_leaderboard().await.unwrap();
    let ranked: Vec<_> = board.iter().map(|e| (e.username.as_str(), e.score)).collect();
    assert_eq!(ranked, [("b", 9), ("c", 9), ("a", 5), ("d", 3)]);
    assert_eq!(board[0].series_name.as_deref(), Some("Capitals"));
    assert_eq!(board[0].recorded_at, fixed_now());

    for i in 0..8 {
        repo.append_score(&entry(&format!("filler{i}"), 4, None))
            .await
            .unwrap();
    }
    let board = repo.load_leaderboard().await.unwrap();
    assert_eq!(board.len(), 10);
    assert_eq!(board.last().map(|e| e.score), Some(4));
    assert!(board.iter().all(|e| e.username != "d"));
    assert!(board.iter().any(|e| e.series_name.is_none()));
}
