use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::db::DbError;
use crate::models::{Game, GameFilter, GameResultRow, ParticipationRow, RoundScoreRow, Team};

/// High-level, read-only interface to the results database.
///
/// Encapsulates all SQL. Every method takes the sidebar filter where it
/// applies; `None` fields mean "all rows" and are bound as NULL arrays so
/// the SQL text stays fixed.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: PgPool,
}

/// High-level numbers for the overview page header.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SummaryStats {
    pub total_games: i64,
    pub avg_teams_per_game: Option<f64>,
    pub latest_game_date: Option<NaiveDate>,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All teams, ordered by name, for selector controls.
    pub async fn list_teams(&self) -> Result<Vec<Team>, DbError> {
        let teams = sqlx::query_as::<_, Team>("SELECT id, name FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(teams)
    }

    /// One team by id, for selection validation.
    pub async fn get_team(&self, team_id: i32) -> Result<Team, DbError> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound)
    }

    /// Distinct game names, categories, and venues for the sidebar filters.
    pub async fn filter_options(&self) -> Result<(Vec<String>, Vec<String>, Vec<String>), DbError> {
        let game_names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT game_name FROM games ORDER BY game_name",
        )
        .fetch_all(&self.pool)
        .await?;
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM games ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;
        let venues =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT venue FROM games ORDER BY venue")
                .fetch_all(&self.pool)
                .await?;
        Ok((game_names, categories, venues))
    }

    /// Total games, average teams per game, and latest game date under the filter.
    pub async fn summary_stats(&self, filter: &GameFilter) -> Result<SummaryStats, DbError> {
        let stats = sqlx::query_as::<_, SummaryStats>(
            r#"
            WITH filtered_games AS (
                SELECT id, game_date
                FROM games
                WHERE ($1::text[] IS NULL OR game_name = ANY($1))
                  AND ($2::text[] IS NULL OR category = ANY($2))
                  AND ($3::text[] IS NULL OR venue = ANY($3))
            ),
            game_counts AS (
                SELECT game_id, COUNT(*) AS team_count
                FROM team_game_participations
                WHERE game_id IN (SELECT id FROM filtered_games)
                GROUP BY game_id
            )
            SELECT
                (SELECT COUNT(*) FROM filtered_games) AS total_games,
                (SELECT AVG(team_count)::float8 FROM game_counts) AS avg_teams_per_game,
                (SELECT MAX(game_date) FROM filtered_games) AS latest_game_date
            "#,
        )
        .bind(&filter.game_names)
        .bind(&filter.categories)
        .bind(&filter.venues)
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    /// Games matching the filter, newest first.
    pub async fn list_games(&self, filter: &GameFilter) -> Result<Vec<Game>, DbError> {
        let games = sqlx::query_as::<_, Game>(
            r#"
            SELECT id, game_date, game_name, game_number, category, venue
            FROM games
            WHERE ($1::text[] IS NULL OR game_name = ANY($1))
              AND ($2::text[] IS NULL OR category = ANY($2))
              AND ($3::text[] IS NULL OR venue = ANY($3))
            ORDER BY game_date DESC, id DESC
            "#,
        )
        .bind(&filter.game_names)
        .bind(&filter.categories)
        .bind(&filter.venues)
        .fetch_all(&self.pool)
        .await?;
        Ok(games)
    }

    /// One game by id.
    pub async fn get_game(&self, game_id: i32) -> Result<Game, DbError> {
        sqlx::query_as::<_, Game>(
            "SELECT id, game_date, game_name, game_number, category, venue FROM games WHERE id = $1",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound)
    }

    /// All participations joined with team and game columns, under the filter.
    pub async fn participations(
        &self,
        filter: &GameFilter,
    ) -> Result<Vec<ParticipationRow>, DbError> {
        let rows = sqlx::query_as::<_, ParticipationRow>(
            r#"
            SELECT
                t.id AS team_id, t.name AS team_name,
                g.id AS game_id, g.game_date, g.game_name, g.venue,
                tgp.rank, tgp.total_score
            FROM team_game_participations tgp
            JOIN teams t ON t.id = tgp.team_id
            JOIN games g ON g.id = tgp.game_id
            WHERE ($1::text[] IS NULL OR g.game_name = ANY($1))
              AND ($2::text[] IS NULL OR g.category = ANY($2))
              AND ($3::text[] IS NULL OR g.venue = ANY($3))
            ORDER BY g.game_date DESC, tgp.rank ASC
            "#,
        )
        .bind(&filter.game_names)
        .bind(&filter.categories)
        .bind(&filter.venues)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// One team's game history under the filter, newest first.
    pub async fn team_history(
        &self,
        team_id: i32,
        filter: &GameFilter,
    ) -> Result<Vec<ParticipationRow>, DbError> {
        let rows = sqlx::query_as::<_, ParticipationRow>(
            r#"
            SELECT
                t.id AS team_id, t.name AS team_name,
                g.id AS game_id, g.game_date, g.game_name, g.venue,
                tgp.rank, tgp.total_score
            FROM team_game_participations tgp
            JOIN teams t ON t.id = tgp.team_id
            JOIN games g ON g.id = tgp.game_id
            WHERE tgp.team_id = $4
              AND ($1::text[] IS NULL OR g.game_name = ANY($1))
              AND ($2::text[] IS NULL OR g.category = ANY($2))
              AND ($3::text[] IS NULL OR g.venue = ANY($3))
            ORDER BY g.game_date DESC
            "#,
        )
        .bind(&filter.game_names)
        .bind(&filter.categories)
        .bind(&filter.venues)
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All round scores joined with participation, team, and game columns.
    pub async fn round_scores(&self, filter: &GameFilter) -> Result<Vec<RoundScoreRow>, DbError> {
        let rows = sqlx::query_as::<_, RoundScoreRow>(
            r#"
            SELECT
                g.id AS game_id, g.game_date, g.game_name,
                t.id AS team_id, t.name AS team_name,
                rs.round_name, rs.score
            FROM round_scores rs
            JOIN team_game_participations tgp ON tgp.id = rs.participation_id
            JOIN teams t ON t.id = tgp.team_id
            JOIN games g ON g.id = tgp.game_id
            WHERE ($1::text[] IS NULL OR g.game_name = ANY($1))
              AND ($2::text[] IS NULL OR g.category = ANY($2))
              AND ($3::text[] IS NULL OR g.venue = ANY($3))
            ORDER BY g.game_date DESC, t.name, rs.round_name
            "#,
        )
        .bind(&filter.game_names)
        .bind(&filter.categories)
        .bind(&filter.venues)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Full results for one game: one row per (team, round), round columns
    /// NULL for participations without a round breakdown.
    pub async fn game_results(&self, game_id: i32) -> Result<Vec<GameResultRow>, DbError> {
        let rows = sqlx::query_as::<_, GameResultRow>(
            r#"
            SELECT
                t.id AS team_id, t.name AS team_name,
                tgp.rank, tgp.total_score,
                rs.round_name, rs.score
            FROM team_game_participations tgp
            JOIN teams t ON t.id = tgp.team_id
            LEFT JOIN round_scores rs ON rs.participation_id = tgp.id
            WHERE tgp.game_id = $1
            ORDER BY tgp.rank ASC, rs.round_name ASC
            "#,
        )
        .bind(game_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
