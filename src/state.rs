use std::sync::Arc;

use crate::config::AppConfig;
use crate::db;
use crate::users::repo::{MongoUserRepo, UserRepo};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepo>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.mongo).await?;

        let users = Arc::new(MongoUserRepo::new(&db, &config.mongo.users_collection))
            as Arc<dyn UserRepo>;

        Ok(Self::from_parts(users, config))
    }

    pub fn from_parts(users: Arc<dyn UserRepo>, config: Arc<AppConfig>) -> Self {
        Self { users, config }
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by an in-memory user store.
    pub fn fake() -> (Self, crate::users::memory::MemoryUserRepo) {
        let repo = crate::users::memory::MemoryUserRepo::default();
        let state = Self::from_parts(
            Arc::new(repo.clone()) as Arc<dyn UserRepo>,
            Arc::new(AppConfig::for_tests()),
        );
        (state, repo)
    }
}
