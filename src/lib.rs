//! Champions API: REST CRUD over champions with role and difficulty lookups, on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{Champion, ChampionInput, ChampionList, NewChampion, UpdateMode};
pub use routes::{api_routes, app, common_routes};
pub use service::{ChampionRepository, ChampionService};
pub use state::AppState;
pub use store::connect;
