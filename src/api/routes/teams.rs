use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::db::DbError;
use crate::models::Team;
use crate::stats::{
    head_to_head, performance_dynamics, team_metrics, DynamicsPoint, HeadToHead,
    RoundComparisonRow, TeamMetrics,
};

async fn require_team(state: &AppState, team_id: i32) -> Result<Team, ApiError> {
    state.repo.get_team(team_id).await.map_err(|e| match e {
        DbError::NotFound => ApiError::NotFound(format!("No team with id {}", team_id)),
        other => ApiError::Internal(other.to_string()),
    })
}

// ── Team list ───────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<Team>,
}

/// All teams, ordered by name, for the team selector.
pub async fn list_teams(State(state): State<AppState>) -> Result<Json<TeamsResponse>, ApiError> {
    let teams = state.repo.list_teams().await?;
    Ok(Json(TeamsResponse { teams }))
}

// ── Performance dynamics ────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct DynamicsResponse {
    pub team: Team,
    /// Absent when the team has no games under the filter.
    pub metrics: Option<TeamMetrics>,
    pub timeline: Vec<DynamicsPoint>,
}

/// One team's rank timeline with running median, plus summary metrics.
pub async fn dynamics(
    State(state): State<AppState>,
    Path(team_id): Path<i32>,
    Query(params): Query<FilterParams>,
) -> Result<Json<DynamicsResponse>, ApiError> {
    let team = require_team(&state, team_id).await?;
    let filter = params.to_filter();

    let history = state.repo.team_history(team_id, &filter).await?;
    let metrics = team_metrics(&history);
    let timeline = performance_dynamics(&history);

    Ok(Json(DynamicsResponse {
        team,
        metrics,
        timeline,
    }))
}

// ── Round comparison ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RoundComparisonParams {
    pub game_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct RoundComparisonResponse {
    pub team: Team,
    pub game_label: String,
    pub rounds: Vec<RoundComparisonRow>,
}

/// One team's round scores in a single game, against the game winner and
/// the best score posted in each round.
pub async fn round_comparison(
    State(state): State<AppState>,
    Path(team_id): Path<i32>,
    Query(params): Query<RoundComparisonParams>,
) -> Result<Json<RoundComparisonResponse>, ApiError> {
    let game_id = params
        .game_id
        .ok_or_else(|| ApiError::BadRequest("game_id query parameter is required".to_string()))?;

    let team = require_team(&state, team_id).await?;
    let game = state.repo.get_game(game_id).await.map_err(|e| match e {
        DbError::NotFound => ApiError::NotFound(format!("No game with id {}", game_id)),
        other => ApiError::Internal(other.to_string()),
    })?;

    let rows = state.repo.game_results(game_id).await?;
    let rounds = crate::stats::round_comparison(&rows, team_id);

    Ok(Json(RoundComparisonResponse {
        team,
        game_label: game.label(),
        rounds,
    }))
}

// ── Head-to-head comparison ─────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub team: Team,
    pub opponent: Team,
    pub team_metrics: Option<TeamMetrics>,
    pub opponent_metrics: Option<TeamMetrics>,
    pub head_to_head: HeadToHead,
}

/// Side-by-side metrics for two teams plus their joint-game record.
pub async fn compare(
    State(state): State<AppState>,
    Path((team_id, opponent_id)): Path<(i32, i32)>,
    Query(params): Query<FilterParams>,
) -> Result<Json<CompareResponse>, ApiError> {
    if team_id == opponent_id {
        return Err(ApiError::BadRequest(
            "Cannot compare a team with itself".to_string(),
        ));
    }

    let team = require_team(&state, team_id).await?;
    let opponent = require_team(&state, opponent_id).await?;
    let filter = params.to_filter();

    let team_history = state.repo.team_history(team_id, &filter).await?;
    let opponent_history = state.repo.team_history(opponent_id, &filter).await?;

    let record = head_to_head(&team_history, &opponent_history);

    Ok(Json(CompareResponse {
        team,
        opponent,
        team_metrics: team_metrics(&team_history),
        opponent_metrics: team_metrics(&opponent_history),
        head_to_head: record,
    }))
}
