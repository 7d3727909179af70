use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::api::routes::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::db::{DbError, SummaryStats};
use crate::models::Game;
use crate::stats::{game_leaderboard, GameLeaderboard};

// ── Overview page ───────────────────────────────────────────────

/// One game line in the overview list, with its selector label.
#[derive(Debug, Serialize)]
pub struct GameSummary {
    #[serde(flatten)]
    pub game: Game,
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub summary: SummaryStats,
    pub games: Vec<GameSummary>,
}

/// Header numbers plus the filtered game list, newest first.
pub async fn overview(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<OverviewResponse>, ApiError> {
    let filter = params.to_filter();

    let summary = state.repo.summary_stats(&filter).await?;
    let games = state
        .repo
        .list_games(&filter)
        .await?
        .into_iter()
        .map(|game| GameSummary {
            label: game.label(),
            game,
        })
        .collect();

    Ok(Json(OverviewResponse { summary, games }))
}

// ── Single-game results ─────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GameResultsResponse {
    pub game: GameSummary,
    pub leaderboard: GameLeaderboard,
}

/// Full leaderboard of one game, round columns included where recorded.
pub async fn game_results(
    State(state): State<AppState>,
    Path(game_id): Path<i32>,
) -> Result<Json<GameResultsResponse>, ApiError> {
    let game = state.repo.get_game(game_id).await.map_err(|e| match e {
        DbError::NotFound => ApiError::NotFound(format!("No game with id {}", game_id)),
        other => ApiError::Internal(other.to_string()),
    })?;

    let rows = state.repo.game_results(game_id).await?;
    let leaderboard = game_leaderboard(&rows);

    Ok(Json(GameResultsResponse {
        game: GameSummary {
            label: game.label(),
            game,
        },
        leaderboard,
    }))
}
