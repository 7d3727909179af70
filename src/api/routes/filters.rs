use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::ApiError;

#[derive(Debug, Serialize)]
pub struct FilterOptionsResponse {
    pub game_names: Vec<String>,
    pub categories: Vec<String>,
    pub venues: Vec<String>,
}

/// Distinct values for the sidebar filter controls.
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, ApiError> {
    let (game_names, categories, venues) = state.repo.filter_options().await?;

    Ok(Json(FilterOptionsResponse {
        game_names,
        categories,
        venues,
    }))
}
