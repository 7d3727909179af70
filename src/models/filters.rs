//! Sidebar filter selections.

use serde::{Deserialize, Serialize};

/// Filter values shared by every aggregation on a page.
///
/// `None` for a field means "all rows"; an empty list is normalized to
/// `None` so the query layer can bind each field as a nullable array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFilter {
    pub game_names: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub venues: Option<Vec<String>>,
}

impl GameFilter {
    /// Build a filter from comma-separated query-parameter strings.
    pub fn from_params(
        game_names: Option<&str>,
        categories: Option<&str>,
        venues: Option<&str>,
    ) -> Self {
        Self {
            game_names: parse_list(game_names),
            categories: parse_list(categories),
            venues: parse_list(venues),
        }
    }

}

fn parse_list(raw: Option<&str>) -> Option<Vec<String>> {
    let values: Vec<String> = raw?
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
