use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries a leaderboard keeps.
pub const LEADERBOARD_CAPACITY: usize = 10;

/// One recorded quiz result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
    #[serde(default)]
    pub series_name: Option<String>,
    pub recorded_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        score: u32,
        series_name: Option<String>,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username: username.into(),
            score,
            series_name,
            recorded_at,
        }
    }
}

/// Top scores, highest first, at most [`LEADERBOARD_CAPACITY`] entries.
///
/// Equal scores keep their insertion order, so an earlier result stays ahead
/// of a later one with the same score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank a raw sequence of entries given in insertion order.
    #[must_use]
    pub fn rank(mut entries: Vec<LeaderboardEntry>) -> Self {
        // `sort_by` is stable; ties keep their insertion order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(LEADERBOARD_CAPACITY);
        Self { entries }
    }

    /// Append `entry`, re-rank and truncate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quiz_core::model::{Leaderboard, LeaderboardEntry};
    /// # use quiz_core::time::fixed_now;
    /// let board = [5, 9, 9, 3].into_iter().enumerate().fold(
    ///     Leaderboard::new(),
    ///     |board, (i, score)| board.record(LeaderboardEntry::new(format!("p{i}"), score, None, fixed_now())),
    /// );
    /// let names: Vec<_> = board.entries().iter().map(|e| e.username.as_str()).collect();
    /// assert_eq!(names, ["p1", "p2", "p0", "p3"]);
    /// ```
    #[must_use]
    pub fn record(self, entry: LeaderboardEntry) -> Self {
        let mut entries = self.entries;
        entries.push(entry);
        Self::rank(entries)
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<LeaderboardEntry> {
        self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1-based rank of the newest entry equal to `entry`, if it made the board.
    ///
    /// Ties keep insertion order, so the latest of several identical entries
    /// is the last one.
    #[must_use]
    pub fn position_of(&self, entry: &LeaderboardEntry) -> Option<usize> {
        self.entries.iter().rposition(|e| e == entry).map(|i| i + 1)
    }
}

/// Free-function form of [`Leaderboard::record`].
#[must_use]
pub fn record(entry: LeaderboardEntry, leaderboard: Leaderboard) -> Leaderboard {
    leaderboard.record(entry)
}
