//! Per-team analysis: performance dynamics, summary metrics, head-to-head.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::ParticipationRow;
use crate::stats::round1;

// ── Performance dynamics ────────────────────────────────────────

/// One point on a team's performance timeline.
#[derive(Debug, Clone, Serialize)]
pub struct DynamicsPoint {
    pub game_id: i32,
    pub game_date: NaiveDate,
    pub game_name: String,
    pub rank: i32,
    pub total_score: f64,
    /// Median of all ranks up to and including this game.
    pub running_median_rank: f64,
}

/// Time-ordered (date, rank) sequence for one team, with the running median
/// rank alongside each point.
pub fn performance_dynamics(history: &[ParticipationRow]) -> Vec<DynamicsPoint> {
    let mut ordered: Vec<&ParticipationRow> = history.iter().collect();
    ordered.sort_by(|a, b| a.game_date.cmp(&b.game_date).then(a.game_id.cmp(&b.game_id)));

    let mut seen_ranks: Vec<i32> = Vec::with_capacity(ordered.len());
    ordered
        .into_iter()
        .map(|row| {
            seen_ranks.push(row.rank);
            DynamicsPoint {
                game_id: row.game_id,
                game_date: row.game_date,
                game_name: row.game_name.clone(),
                rank: row.rank,
                total_score: row.total_score,
                running_median_rank: median(&seen_ranks),
            }
        })
        .collect()
}

fn median(values: &[i32]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

// ── Summary metrics ─────────────────────────────────────────────

/// One team's side of the comparison table.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMetrics {
    pub team_id: i32,
    pub team_name: String,
    pub games_played: u32,
    pub total_score: f64,
    pub avg_score: f64,
    pub avg_rank: f64,
    pub top3_count: u32,
    pub top3_rate_pct: f64,
    pub best_rank: i32,
    pub worst_rank: i32,
}

/// Summary metrics over one team's history.
///
/// Returns `None` for an empty history: an undefined average is reported
/// as absent, never as zero.
pub fn team_metrics(history: &[ParticipationRow]) -> Option<TeamMetrics> {
    let first = history.first()?;
    let games = history.len() as u32;

    let total_score: f64 = history.iter().map(|r| r.total_score).sum();
    let rank_sum: i64 = history.iter().map(|r| r.rank as i64).sum();
    let top3 = history.iter().filter(|r| r.is_top_n(3)).count() as u32;
    let best = history.iter().map(|r| r.rank).min()?;
    let worst = history.iter().map(|r| r.rank).max()?;

    Some(TeamMetrics {
        team_id: first.team_id,
        team_name: first.team_name.clone(),
        games_played: games,
        total_score,
        avg_score: round1(total_score / games as f64),
        avg_rank: round1(rank_sum as f64 / games as f64),
        top3_count: top3,
        top3_rate_pct: round1(top3 as f64 / games as f64 * 100.0),
        best_rank: best,
        worst_rank: worst,
    })
}

// ── Head-to-head ────────────────────────────────────────────────

/// One jointly-played game, aligned across the two teams.
#[derive(Debug, Clone, Serialize)]
pub struct HeadToHeadGame {
    pub game_id: i32,
    pub game_date: NaiveDate,
    pub game_name: String,
    pub team_rank: i32,
    pub opponent_rank: i32,
    pub team_score: f64,
    pub opponent_score: f64,
    /// Id of the better-placed team; `None` when the ranks tie.
    pub winner_team_id: Option<i32>,
}

/// Head-to-head record between two teams, from the first team's perspective.
#[derive(Debug, Clone, Serialize)]
pub struct HeadToHead {
    pub games: Vec<HeadToHeadGame>,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Mean of (team score − opponent score) over joint games; absent when
    /// the teams share no games.
    pub avg_score_diff: Option<f64>,
}

/// Restrict two teams' histories to games both played and align them by game.
///
/// Equal ranks count as a tie, not a win for either side, so
/// wins + losses + ties always equals the number of joint games.
pub fn head_to_head(team: &[ParticipationRow], opponent: &[ParticipationRow]) -> HeadToHead {
    let opponent_by_game: HashMap<i32, &ParticipationRow> =
        opponent.iter().map(|r| (r.game_id, r)).collect();

    let mut games: Vec<HeadToHeadGame> = team
        .iter()
        .filter_map(|ours| {
            let theirs = opponent_by_game.get(&ours.game_id)?;
            let winner_team_id = match ours.rank.cmp(&theirs.rank) {
                std::cmp::Ordering::Less => Some(ours.team_id),
                std::cmp::Ordering::Greater => Some(theirs.team_id),
                std::cmp::Ordering::Equal => None,
            };
            Some(HeadToHeadGame {
                game_id: ours.game_id,
                game_date: ours.game_date,
                game_name: ours.game_name.clone(),
                team_rank: ours.rank,
                opponent_rank: theirs.rank,
                team_score: ours.total_score,
                opponent_score: theirs.total_score,
                winner_team_id,
            })
        })
        .collect();
    games.sort_by(|a, b| b.game_date.cmp(&a.game_date).then(b.game_id.cmp(&a.game_id)));

    let team_id = team.first().map(|r| r.team_id);
    let wins = games
        .iter()
        .filter(|g| g.winner_team_id.is_some() && g.winner_team_id == team_id)
        .count() as u32;
    let ties = games.iter().filter(|g| g.winner_team_id.is_none()).count() as u32;
    let losses = games.len() as u32 - wins - ties;

    let avg_score_diff = if games.is_empty() {
        None
    } else {
        let diff_sum: f64 = games.iter().map(|g| g.team_score - g.opponent_score).sum();
        Some(round1(diff_sum / games.len() as f64))
    };

    HeadToHead {
        games,
        wins,
        losses,
        ties,
        avg_score_diff,
    }
}
