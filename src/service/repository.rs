//! Storage seam between the HTTP layer and the champion tables.

use crate::error::AppError;
use crate::model::{Champion, ChampionInput, ChampionList, NewChampion, UpdateMode};
use async_trait::async_trait;

/// Champion persistence. Every write is atomic: either the champion row and all of its role
/// rows change together, or nothing changes.
#[async_trait]
pub trait ChampionRepository: Send + Sync {
    /// Page ordered by ascending id, plus the unfiltered total.
    async fn list(&self, offset: i64, limit: i64) -> Result<ChampionList, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Champion>, AppError>;

    async fn create(&self, champion: NewChampion) -> Result<Champion, AppError>;

    /// Returns `Ok(None)` when no champion has this id. Validation failures happen before any write.
    async fn update(
        &self,
        id: i64,
        input: ChampionInput,
        mode: UpdateMode,
    ) -> Result<Option<Champion>, AppError>;

    /// Idempotent: deleting a missing id succeeds.
    async fn delete(&self, id: i64) -> Result<(), AppError>;

    /// Round trip to the backing store, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
