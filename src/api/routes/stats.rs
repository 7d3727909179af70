use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::FilterParams;
use crate::api::state::AppState;
use crate::api::ApiError;
use crate::models::GameFilter;
use crate::stats::{
    compute_standings, finish_buckets, round_average_pivot, FinishBuckets, RoundAveragePivot,
    TeamStanding,
};

// ── Overall standings ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StandingsParams {
    pub game_names: Option<String>,
    pub categories: Option<String>,
    pub venues: Option<String>,
    /// Cap on the number of rows returned, applied after sorting.
    pub limit: Option<usize>,
}

impl StandingsParams {
    fn to_filter(&self) -> GameFilter {
        GameFilter::from_params(
            self.game_names.as_deref(),
            self.categories.as_deref(),
            self.venues.as_deref(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct StandingsResponse {
    pub standings: Vec<TeamStanding>,
    pub total_teams: usize,
}

/// Overall standings under the sidebar filter, best average rank first.
pub async fn standings(
    State(state): State<AppState>,
    Query(params): Query<StandingsParams>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let filter = params.to_filter();

    let rows = state.repo.participations(&filter).await?;
    let mut standings = compute_standings(&rows);
    let total_teams = standings.len();
    if let Some(limit) = params.limit {
        standings.truncate(limit);
    }

    Ok(Json(StandingsResponse {
        standings,
        total_teams,
    }))
}

// ── Top finishes ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct TopFinishesResponse {
    pub teams: Vec<FinishBuckets>,
}

/// Per-team counts of first, second, and third places.
pub async fn top_finishes(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<TopFinishesResponse>, ApiError> {
    let filter = params.to_filter();

    let rows = state.repo.participations(&filter).await?;
    let teams = finish_buckets(&rows);

    Ok(Json(TopFinishesResponse { teams }))
}

// ── Round averages ──────────────────────────────────────────────

/// Matrix of mean round scores: one row per game, one column per round.
pub async fn round_averages(
    State(state): State<AppState>,
    Query(params): Query<FilterParams>,
) -> Result<Json<RoundAveragePivot>, ApiError> {
    let filter = params.to_filter();

    let rows = state.repo.round_scores(&filter).await?;
    let pivot = round_average_pivot(&rows);

    Ok(Json(pivot))
}
