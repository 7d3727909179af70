use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::Repository;

#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(repo: Repository, config: AppConfig) -> Self {
        Self {
            repo,
            config: Arc::new(config),
        }
    }
}
