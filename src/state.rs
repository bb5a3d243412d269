//! Shared application state for all routes.

use crate::config::AppConfig;
use crate::response::LinkBuilder;
use crate::service::{ChampionRepository, ChampionService};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub champions: Arc<dyn ChampionRepository>,
    /// Stripped from request paths before routing.
    pub base_path: Arc<str>,
    pub links: LinkBuilder,
    pub body_limit: usize,
}

impl AppState {
    pub fn new(champions: Arc<dyn ChampionRepository>, config: &AppConfig) -> Self {
        AppState {
            champions,
            base_path: Arc::from(config.base_path.as_str()),
            links: LinkBuilder::new(&config.base_path),
            body_limit: config.body_limit,
        }
    }

    pub fn from_pool(pool: PgPool, config: &AppConfig) -> Self {
        Self::new(Arc::new(ChampionService::new(pool)), config)
    }
}
