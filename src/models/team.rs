//! Team model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A team as stored in the `teams` table.
///
/// Teams are created exclusively by the external ingestion project;
/// this crate only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Team {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_serialization() {
        let team = Team {
            id: 7,
            name: "The Usual Suspects".to_string(),
        };
        let json = serde_json::to_string(&team).unwrap();
        let parsed: Team = serde_json::from_str(&json).unwrap();
        assert_eq!(team, parsed);
    }
}
