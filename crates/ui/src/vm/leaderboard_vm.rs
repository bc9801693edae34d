use quiz_core::model::Leaderboard;

use crate::vm::time_fmt::format_datetime;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRowVm {
    pub rank: usize,
    pub username: String,
    pub score: u32,
    pub series_label: String,
    pub recorded_at_str: String,
}

#[must_use]
pub fn map_leaderboard_rows(board: &Leaderboard) -> Vec<LeaderboardRowVm> {
    board
        .entries()
        .iter()
        .enumerate()
        .map(|(i, entry)| LeaderboardRowVm {
            rank: i + 1,
            username: entry.username.clone(),
            score: entry.score,
            series_label: entry.series_name.clone().unwrap_or_else(|| "-".to_string()),
            recorded_at_str: format_datetime(entry.recorded_at),
        })
        .collect()
}
