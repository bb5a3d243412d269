//! HTTP controllers, one per resource.

pub mod champion;
pub use champion::ChampionController;
