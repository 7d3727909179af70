//! # Quiz Stats
//!
//! A read-only analytics API over a trivia-game results database.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (teams, games, result rows, filters)
//! - **db**: PostgreSQL connection pool and read-only queries
//! - **stats**: Pure aggregation functions over query rows
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod stats;

pub use models::*;
