//! Round-level pivots: per-game round averages, single-game leaderboards,
//! and the team-vs-winner-vs-max round comparison.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{GameResultRow, RoundScoreRow};
use crate::stats::sort_round_names;

// ── Round-average pivot ─────────────────────────────────────────

/// One matrix row: a game and its per-round mean scores.
///
/// `cells` aligns with the pivot's `round_names`; a cell is `None` when no
/// team has a score for that round in that game (absent, never zero).
#[derive(Debug, Clone, Serialize)]
pub struct GameRoundAverages {
    pub game_id: i32,
    pub game_date: NaiveDate,
    pub game_name: String,
    pub cells: Vec<Option<f64>>,
}

/// Matrix of mean round scores: rows = games, columns = round names.
#[derive(Debug, Clone, Serialize)]
pub struct RoundAveragePivot {
    pub round_names: Vec<String>,
    pub rows: Vec<GameRoundAverages>,
}

/// Pivot round scores into a (game × round) matrix of arithmetic means.
///
/// Column order is the natural round-name sort; rows are newest game first.
pub fn round_average_pivot(rows: &[RoundScoreRow]) -> RoundAveragePivot {
    let mut names: BTreeSet<String> = BTreeSet::new();
    // game_id -> (date, name, round -> (sum, count))
    let mut games: HashMap<i32, (NaiveDate, String, HashMap<String, (f64, u32)>)> = HashMap::new();

    for row in rows {
        names.insert(row.round_name.clone());
        let entry = games.entry(row.game_id).or_insert_with(|| {
            (row.game_date, row.game_name.clone(), HashMap::new())
        });
        let cell = entry.2.entry(row.round_name.clone()).or_insert((0.0, 0));
        cell.0 += row.score;
        cell.1 += 1;
    }

    let mut round_names: Vec<String> = names.into_iter().collect();
    sort_round_names(&mut round_names);

    let mut pivot_rows: Vec<GameRoundAverages> = games
        .into_iter()
        .map(|(game_id, (game_date, game_name, cells))| {
            let cells = round_names
                .iter()
                .map(|round| cells.get(round).map(|(sum, count)| sum / *count as f64))
                .collect();
            GameRoundAverages {
                game_id,
                game_date,
                game_name,
                cells,
            }
        })
        .collect();
    pivot_rows.sort_by(|a, b| b.game_date.cmp(&a.game_date).then(b.game_id.cmp(&a.game_id)));

    RoundAveragePivot {
        round_names,
        rows: pivot_rows,
    }
}

// ── Single-game leaderboard ─────────────────────────────────────

/// One team's line in a game leaderboard, with its scores pivoted by round.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i32,
    pub team_id: i32,
    pub team_name: String,
    pub total_score: f64,
    /// Aligned with the leaderboard's `round_names`.
    pub round_scores: Vec<Option<f64>>,
}

/// Full results of one game: ranked teams with per-round columns.
#[derive(Debug, Clone, Serialize)]
pub struct GameLeaderboard {
    pub round_names: Vec<String>,
    pub entries: Vec<LeaderboardEntry>,
    /// Name of the rank-1 team. With tied firsts, the first row in rank
    /// order is reported; ties themselves pass through unmodified.
    pub winner: Option<String>,
    pub highest_score: Option<f64>,
}

/// Pivot a game's flattened (team, round) rows into a leaderboard table.
pub fn game_leaderboard(rows: &[GameResultRow]) -> GameLeaderboard {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        if let Some(round) = &row.round_name {
            names.insert(round.clone());
        }
    }
    let mut round_names: Vec<String> = names.into_iter().collect();
    sort_round_names(&mut round_names);

    // team_id -> (rank, name, total, round -> score). Rank and total repeat
    // on every joined row for a team, so the first row wins.
    let mut teams: HashMap<i32, (i32, String, f64, HashMap<String, f64>)> = HashMap::new();
    for row in rows {
        let entry = teams.entry(row.team_id).or_insert_with(|| {
            (
                row.rank,
                row.team_name.clone(),
                row.total_score,
                HashMap::new(),
            )
        });
        if let (Some(round), Some(score)) = (&row.round_name, row.score) {
            entry.3.insert(round.clone(), score);
        }
    }

    let mut entries: Vec<LeaderboardEntry> = teams
        .into_iter()
        .map(|(team_id, (rank, team_name, total_score, scores))| {
            let round_scores = round_names
                .iter()
                .map(|round| scores.get(round).copied())
                .collect();
            LeaderboardEntry {
                rank,
                team_id,
                team_name,
                total_score,
                round_scores,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.team_name.cmp(&b.team_name)));

    let winner = entries
        .iter()
        .find(|e| e.rank == 1)
        .map(|e| e.team_name.clone());
    let highest_score = entries
        .iter()
        .map(|e| e.total_score)
        .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    GameLeaderboard {
        round_names,
        entries,
        winner,
        highest_score,
    }
}

// ── Round comparison ────────────────────────────────────────────

/// One round of a game, compared across the selected team, the game winner,
/// and the best score anyone posted in that round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundComparisonRow {
    pub round_name: String,
    /// The selected team's score; absent when it has none for this round.
    pub team_score: Option<f64>,
    /// The overall game winner's score in this round.
    pub winner_score: Option<f64>,
    /// Best score anyone posted in this round; absent when no team has one.
    pub max_score: Option<f64>,
    /// Teams that posted `max_score` in this round.
    pub max_scorers: Vec<String>,
}

/// Per-round comparison of one team against the game winner and the round maximum.
///
/// `rows` is the full result set of a single game. Returns an empty table
/// when the game has no round breakdown.
pub fn round_comparison(rows: &[GameResultRow], team_id: i32) -> Vec<RoundComparisonRow> {
    let winner_id = rows.iter().find(|r| r.rank == 1).map(|r| r.team_id);

    let mut names: BTreeSet<String> = BTreeSet::new();
    for row in rows {
        if let Some(round) = &row.round_name {
            names.insert(round.clone());
        }
    }
    let mut round_names: Vec<String> = names.into_iter().collect();
    sort_round_names(&mut round_names);

    round_names
        .into_iter()
        .map(|round| {
            let in_round = |r: &&GameResultRow| r.round_name.as_deref() == Some(round.as_str());

            let team_score = rows
                .iter()
                .filter(in_round)
                .find(|r| r.team_id == team_id)
                .and_then(|r| r.score);
            let winner_score = rows
                .iter()
                .filter(in_round)
                .find(|r| Some(r.team_id) == winner_id)
                .and_then(|r| r.score);
            let max_score = rows
                .iter()
                .filter(in_round)
                .filter_map(|r| r.score)
                .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let max_scorers: Vec<String> = match max_score {
                Some(max) => rows
                    .iter()
                    .filter(in_round)
                    .filter(|r| r.score == Some(max))
                    .map(|r| r.team_name.clone())
                    .collect(),
                None => Vec::new(),
            };

            RoundComparisonRow {
                round_name: round,
                team_score,
                winner_score,
                max_score,
                max_scorers,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn score_row(
        game_id: i32,
        day: u32,
        team_id: i32,
        team: &str,
        round: &str,
        score: f64,
    ) -> RoundScoreRow {
        RoundScoreRow {
            game_id,
            game_date: NaiveDate::from_ymd_opt(2026, 2, day).unwrap(),
            game_name: "Classic".to_string(),
            team_id,
            team_name: team.to_string(),
            round_name: round.to_string(),
            score,
        }
    }

    fn result_row(
        team_id: i32,
        team: &str,
        rank: i32,
        total: f64,
        round: Option<&str>,
        score: Option<f64>,
    ) -> GameResultRow {
        GameResultRow {
            team_id,
            team_name: team.to_string(),
            rank,
            total_score: total,
            round_name: round.map(String::from),
            score,
        }
    }

    #[test]
    fn test_pivot_cells_are_arithmetic_means() {
        let rows = vec![
            score_row(1, 1, 1, "A", "round 1", 4.0),
            score_row(1, 1, 2, "B", "round 1", 6.0),
            score_row(1, 1, 1, "A", "round 2", 5.0),
        ];
        let pivot = round_average_pivot(&rows);

        assert_eq!(pivot.round_names, vec!["round 1", "round 2"]);
        assert_eq!(pivot.rows.len(), 1);
        // (4 + 6) / 2 = 5
        assert_eq!(pivot.rows[0].cells[0], Some(5.0));
        assert_eq!(pivot.rows[0].cells[1], Some(5.0));
    }

    #[test]
    fn test_pivot_absent_cell_is_none_not_zero() {
        let rows = vec![
            score_row(1, 1, 1, "A", "round 1", 4.0),
            score_row(2, 2, 1, "A", "round 2", 3.0),
        ];
        let pivot = round_average_pivot(&rows);

        // Game 2 is newer, so it comes first.
        assert_eq!(pivot.rows[0].game_id, 2);
        assert_eq!(pivot.rows[0].cells, vec![None, Some(3.0)]);
        assert_eq!(pivot.rows[1].cells, vec![Some(4.0), None]);
    }

    #[test]
    fn test_pivot_empty() {
        let pivot = round_average_pivot(&[]);
        assert!(pivot.round_names.is_empty());
        assert!(pivot.rows.is_empty());
    }

    #[test]
    fn test_leaderboard_pivot() {
        let rows = vec![
            result_row(1, "A", 1, 46.0, Some("round 1"), Some(6.0)),
            result_row(1, "A", 1, 46.0, Some("round 2"), Some(8.0)),
            result_row(2, "B", 2, 40.0, Some("round 1"), Some(5.0)),
            result_row(2, "B", 2, 40.0, Some("round 2"), Some(7.0)),
        ];
        let board = game_leaderboard(&rows);

        assert_eq!(board.round_names, vec!["round 1", "round 2"]);
        assert_eq!(board.entries.len(), 2);
        assert_eq!(board.entries[0].team_name, "A");
        assert_eq!(board.entries[0].round_scores, vec![Some(6.0), Some(8.0)]);
        assert_eq!(board.winner.as_deref(), Some("A"));
        assert_eq!(board.highest_score, Some(46.0));
    }

    #[test]
    fn test_leaderboard_without_round_breakdown() {
        // LEFT JOIN produced NULL round columns.
        let rows = vec![
            result_row(1, "A", 1, 30.0, None, None),
            result_row(2, "B", 2, 25.0, None, None),
        ];
        let board = game_leaderboard(&rows);

        assert!(board.round_names.is_empty());
        assert_eq!(board.entries.len(), 2);
        assert!(board.entries[0].round_scores.is_empty());
    }

    #[test]
    fn test_leaderboard_empty() {
        let board = game_leaderboard(&[]);
        assert!(board.entries.is_empty());
        assert_eq!(board.winner, None);
        assert_eq!(board.highest_score, None);
    }

    #[test]
    fn test_round_comparison() {
        let rows = vec![
            result_row(1, "A", 1, 11.0, Some("round 1"), Some(5.0)),
            result_row(1, "A", 1, 11.0, Some("round 2"), Some(6.0)),
            result_row(2, "B", 2, 10.0, Some("round 1"), Some(7.0)),
            result_row(2, "B", 2, 10.0, Some("round 2"), Some(3.0)),
        ];
        let comparison = round_comparison(&rows, 2);

        assert_eq!(comparison.len(), 2);
        let r1 = &comparison[0];
        assert_eq!(r1.round_name, "round 1");
        assert_eq!(r1.team_score, Some(7.0));
        assert_eq!(r1.winner_score, Some(5.0));
        assert_eq!(r1.max_score, Some(7.0));
        assert_eq!(r1.max_scorers, vec!["B"]);

        let r2 = &comparison[1];
        assert_eq!(r2.team_score, Some(3.0));
        assert_eq!(r2.winner_score, Some(6.0));
        assert_eq!(r2.max_score, Some(6.0));
    }

    #[test]
    fn test_round_comparison_scoreless_round_has_no_max() {
        // A round name can appear with a NULL score; the round then has no
        // maximum rather than a sentinel value.
        let rows = vec![
            result_row(1, "A", 1, 0.0, Some("round 1"), None),
            result_row(2, "B", 2, 0.0, Some("round 1"), None),
        ];
        let comparison = round_comparison(&rows, 1);

        assert_eq!(comparison.len(), 1);
        assert_eq!(comparison[0].max_score, None);
        assert!(comparison[0].max_scorers.is_empty());
    }

    #[test]
    fn test_round_comparison_missing_team_round_is_absent() {
        let rows = vec![
            result_row(1, "A", 1, 5.0, Some("round 1"), Some(5.0)),
            result_row(2, "B", 2, 0.0, None, None),
        ];
        let comparison = round_comparison(&rows, 2);

        assert_eq!(comparison.len(), 1);
        assert_eq!(comparison[0].team_score, None);
        assert_eq!(comparison[0].winner_score, Some(5.0));
    }

    #[test]
    fn test_round_comparison_empty() {
        assert!(round_comparison(&[], 1).is_empty());
    }
}
