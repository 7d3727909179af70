//! Route handlers, one module per dashboard page.

pub mod filters;
pub mod overview;
pub mod stats;
pub mod teams;

use serde::Deserialize;

use crate::models::GameFilter;

/// Sidebar filter query parameters, each a comma-separated list.
///
/// Shared by every endpoint whose output respects the sidebar selection.
#[derive(Debug, Default, Deserialize)]
pub struct FilterParams {
    pub game_names: Option<String>,
    pub categories: Option<String>,
    pub venues: Option<String>,
}

impl FilterParams {
    pub fn to_filter(&self) -> GameFilter {
        GameFilter::from_params(
            self.game_names.as_deref(),
            self.categories.as_deref(),
            self.venues.as_deref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_params_to_filter() {
        let params = FilterParams {
            game_names: Some("Classic,Music Special".to_string()),
            categories: None,
            venues: Some("".to_string()),
        };
        let filter = params.to_filter();
        assert_eq!(
            filter.game_names,
            Some(vec!["Classic".to_string(), "Music Special".to_string()])
        );
        assert_eq!(filter.categories, None);
        assert_eq!(filter.venues, None);
    }
}
