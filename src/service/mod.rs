//! Champion service: typed validation, repository seam, PostgreSQL implementation.

mod crud;
mod repository;
mod validation;
pub use crud::ChampionService;
pub use repository::ChampionRepository;
pub use validation::{dedup_ids, UpdatePlan};
