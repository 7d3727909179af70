//! Game model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single quiz night as stored in the `games` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Game {
    pub id: i32,

    /// Date the game took place.
    pub game_date: NaiveDate,

    /// Series name (e.g. "Classic", "Music Special").
    pub game_name: String,

    /// Game number within the series, kept as text ("#412.2").
    pub game_number: String,

    pub category: String,

    pub venue: String,
}

impl Game {
    /// Human-readable label used by game selectors: "2026-03-14 - Classic (#412.2)".
    pub fn label(&self) -> String {
        format!(
            "{} - {} ({})",
            self.game_date, self.game_name, self.game_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_label() {
        let game = Game {
            id: 1,
            game_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            game_name: "Classic".to_string(),
            game_number: "#412.2".to_string(),
            category: "classic".to_string(),
            venue: "Downtown Pub".to_string(),
        };
        assert_eq!(game.label(), "2026-03-14 - Classic (#412.2)");
    }
}
