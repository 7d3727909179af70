//! Overall standings and top-N finish analysis.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::ParticipationRow;
use crate::stats::round1;

/// One team's line in the overall standings table.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStanding {
    pub team_id: i32,
    pub team_name: String,
    pub games_played: u32,
    /// Mean placement across the team's games, 1.0 being perfect.
    pub avg_rank: f64,
    pub top3_count: u32,
    pub total_score: f64,
    pub avg_score: f64,
}

/// Group participations by team and rank the teams.
///
/// Sorted by average rank ascending, then games played descending, then
/// name, so equally-placed teams order deterministically. Teams with no
/// matching rows simply don't appear; the empty input yields an empty table.
pub fn compute_standings(rows: &[ParticipationRow]) -> Vec<TeamStanding> {
    struct Acc {
        name: String,
        games: u32,
        rank_sum: i64,
        top3: u32,
        score_sum: f64,
    }

    let mut by_team: HashMap<i32, Acc> = HashMap::new();
    for row in rows {
        let entry = by_team.entry(row.team_id).or_insert_with(|| Acc {
            name: row.team_name.clone(),
            games: 0,
            rank_sum: 0,
            top3: 0,
            score_sum: 0.0,
        });
        entry.games += 1;
        entry.rank_sum += row.rank as i64;
        if row.is_top_n(3) {
            entry.top3 += 1;
        }
        entry.score_sum += row.total_score;
    }

    let mut standings: Vec<TeamStanding> = by_team
        .into_iter()
        .map(|(team_id, acc)| {
            // Every group has at least one row, so the averages are defined.
            let games = acc.games as f64;
            TeamStanding {
                team_id,
                team_name: acc.name,
                games_played: acc.games,
                avg_rank: acc.rank_sum as f64 / games,
                top3_count: acc.top3,
                total_score: acc.score_sum,
                avg_score: round1(acc.score_sum / games),
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        a.avg_rank
            .partial_cmp(&b.avg_rank)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.games_played.cmp(&a.games_played))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });

    standings
}

/// Finish counts bucketed by placement, for the proportion chart.
#[derive(Debug, Clone, Serialize)]
pub struct FinishBuckets {
    pub team_id: i32,
    pub team_name: String,
    pub first: u32,
    pub second: u32,
    pub third: u32,
    pub other: u32,
    pub games_played: u32,
}

impl FinishBuckets {
    pub fn top3_total(&self) -> u32 {
        self.first + self.second + self.third
    }
}

/// Count each team's finishes per rank bucket.
///
/// The four buckets always sum to the team's games played. Sorted by top-3
/// finishes descending, then games played descending, then name.
pub fn finish_buckets(rows: &[ParticipationRow]) -> Vec<FinishBuckets> {
    let mut by_team: HashMap<i32, FinishBuckets> = HashMap::new();
    for row in rows {
        let entry = by_team.entry(row.team_id).or_insert_with(|| FinishBuckets {
            team_id: row.team_id,
            team_name: row.team_name.clone(),
            first: 0,
            second: 0,
            third: 0,
            other: 0,
            games_played: 0,
        });
        match row.rank {
            1 => entry.first += 1,
            2 => entry.second += 1,
            3 => entry.third += 1,
            _ => entry.other += 1,
        }
        entry.games_played += 1;
    }

    let mut buckets: Vec<FinishBuckets> = by_team.into_values().collect();
    buckets.sort_by(|a, b| {
        b.top3_total()
            .cmp(&a.top3_total())
            .then_with(|| b.games_played.cmp(&a.games_played))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn row(team_id: i32, name: &str, game_id: i32, rank: i32, score: f64) -> ParticipationRow {
        ParticipationRow {
            team_id,
            team_name: name.to_string(),
            game_id,
            game_date: NaiveDate::from_ymd_opt(2026, 1, game_id as u32).unwrap(),
            game_name: "Classic".to_string(),
            venue: "Downtown Pub".to_string(),
            rank,
            total_score: score,
        }
    }

    #[test]
    fn test_standings_scenario() {
        // Team A played G1 rank=1, G2 rank=3: avg rank 2.0, top-3 count 2.
        let rows = vec![row(1, "A", 1, 1, 45.0), row(1, "A", 2, 3, 38.0)];
        let standings = compute_standings(&rows);

        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].games_played, 2);
        assert_eq!(standings[0].avg_rank, 2.0);
        assert_eq!(standings[0].top3_count, 2);
        assert_eq!(standings[0].total_score, 83.0);
        assert_eq!(standings[0].avg_score, 41.5);
    }

    #[test]
    fn test_standings_sort_order() {
        let rows = vec![
            // Beta: avg rank 2.0 over one game
            row(2, "Beta", 1, 2, 30.0),
            // Alpha: avg rank 2.0 over two games -> ahead of Beta
            row(1, "Alpha", 1, 1, 40.0),
            row(1, "Alpha", 2, 3, 35.0),
            // Gamma: avg rank 1.0 -> first
            row(3, "Gamma", 2, 1, 50.0),
        ];
        let standings = compute_standings(&rows);
        let names: Vec<&str> = standings.iter().map(|s| s.team_name.as_str()).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn test_standings_avg_rank_within_observed_range() {
        let rows = vec![
            row(1, "A", 1, 2, 30.0),
            row(1, "A", 2, 7, 25.0),
            row(1, "A", 3, 4, 28.0),
        ];
        let standings = compute_standings(&rows);
        let max_rank = 7.0;
        assert!(standings[0].avg_rank >= 1.0);
        assert!(standings[0].avg_rank <= max_rank);
    }

    #[test]
    fn test_standings_empty_input() {
        assert!(compute_standings(&[]).is_empty());
    }

    #[test]
    fn test_finish_buckets_sum_to_games_played() {
        let rows = vec![
            row(1, "A", 1, 1, 40.0),
            row(1, "A", 2, 2, 39.0),
            row(1, "A", 3, 5, 31.0),
            row(1, "A", 4, 3, 36.0),
            row(2, "B", 1, 9, 20.0),
        ];
        let buckets = finish_buckets(&rows);

        for b in &buckets {
            assert_eq!(b.first + b.second + b.third + b.other, b.games_played);
        }

        let a = buckets.iter().find(|b| b.team_name == "A").unwrap();
        assert_eq!(a.first, 1);
        assert_eq!(a.second, 1);
        assert_eq!(a.third, 1);
        assert_eq!(a.other, 1);

        let b = buckets.iter().find(|b| b.team_name == "B").unwrap();
        assert_eq!(b.top3_total(), 0);
        assert_eq!(b.other, 1);
    }

    #[test]
    fn test_finish_buckets_sorted_by_top3() {
        let rows = vec![
            row(1, "Rarely", 1, 8, 20.0),
            row(2, "Often", 1, 1, 45.0),
            row(2, "Often", 2, 2, 41.0),
        ];
        let buckets = finish_buckets(&rows);
        assert_eq!(buckets[0].team_name, "Often");
    }

    #[test]
    fn test_finish_buckets_empty() {
        assert!(finish_buckets(&[]).is_empty());
    }
}
