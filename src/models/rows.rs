//! Joined row types returned by the query layer.
//!
//! These mirror the flattened shapes the SQL joins produce. The aggregation
//! layer consumes them as plain tabular input and never touches the database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One team's participation in one game, joined with team and game columns.
///
/// `rank` is 1-based placement, unique within a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ParticipationRow {
    pub team_id: i32,
    pub team_name: String,
    pub game_id: i32,
    pub game_date: NaiveDate,
    pub game_name: String,
    pub venue: String,
    pub rank: i32,
    pub total_score: f64,
}

impl ParticipationRow {
    /// Whether this participation finished in the top N placements.
    pub fn is_top_n(&self, n: i32) -> bool {
        self.rank <= n
    }
}

/// One round score joined with its participation, team, and game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RoundScoreRow {
    pub game_id: i32,
    pub game_date: NaiveDate,
    pub game_name: String,
    pub team_id: i32,
    pub team_name: String,
    pub round_name: String,
    pub score: f64,
}

/// Full results for a single game: one row per (team, round), with the
/// round columns nullable for participations that have no round breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GameResultRow {
    pub team_id: i32,
    pub team_name: String,
    pub rank: i32,
    pub total_score: f64,
    pub round_name: Option<String>,
    pub score: Option<f64>,
}
