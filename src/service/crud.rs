//! Champion CRUD against PostgreSQL.

use crate::error::AppError;
use crate::model::{Champion, ChampionInput, ChampionList, NewChampion, UpdateMode};
use crate::service::repository::ChampionRepository;
use crate::service::validation::UpdatePlan;
use crate::sql::{
    update_champion, QueryBuf, COUNT_CHAMPIONS, DELETE_CHAMPION, DELETE_ROLES, INSERT_CHAMPION,
    INSERT_ROLES, LOCK_CHAMPION, SELECT_BY_ID, SELECT_PAGE,
};
use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

/// Pool-backed champion service. Cheap to clone; the pool is shared.
#[derive(Clone)]
pub struct ChampionService {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct ChampionRow {
    id: i64,
    name: String,
    title: String,
    roles: Json<Vec<String>>,
    description: String,
    difficulty: Option<String>,
}

impl From<ChampionRow> for Champion {
    fn from(row: ChampionRow) -> Self {
        let Json(mut roles) = row.roles;
        dedup_labels(&mut roles);
        Champion {
            id: row.id,
            name: row.name,
            title: row.title,
            roles,
            description: row.description,
            difficulty: row.difficulty,
        }
    }
}

/// Two roles may share a label; the representation lists each label once.
fn dedup_labels(labels: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    labels.retain(|l| seen.insert(l.clone()));
}

impl ChampionService {
    pub fn new(pool: PgPool) -> Self {
        ChampionService { pool }
    }

    async fn fetch_by_id(conn: &mut PgConnection, id: i64) -> Result<Option<Champion>, AppError> {
        tracing::debug!(sql = %SELECT_BY_ID, id, "query");
        let row: Option<ChampionRow> = sqlx::query_as(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row.map(Champion::from))
    }

    async fn insert_roles(conn: &mut PgConnection, id: i64, roles: &[i64]) -> Result<(), AppError> {
        if roles.is_empty() {
            return Ok(());
        }
        tracing::debug!(sql = %INSERT_ROLES, id, roles = ?roles, "query (tx)");
        sqlx::query(INSERT_ROLES)
            .bind(id)
            .bind(roles)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn insert_tx(conn: &mut PgConnection, champion: &NewChampion) -> Result<Champion, AppError> {
        tracing::debug!(sql = %INSERT_CHAMPION, "query (tx)");
        let id: i64 = sqlx::query_scalar(INSERT_CHAMPION)
            .bind(champion.name.as_str())
            .bind(champion.title.as_str())
            .bind(champion.description.as_str())
            .bind(champion.difficulty)
            .fetch_one(&mut *conn)
            .await?;
        Self::insert_roles(conn, id, &champion.roles).await?;
        Self::fetch_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("champion {} missing after insert", id)))
    }

    async fn update_tx(
        conn: &mut PgConnection,
        id: i64,
        plan: UpdatePlan,
    ) -> Result<Option<Champion>, AppError> {
        let locked: Option<i64> = sqlx::query_scalar(LOCK_CHAMPION)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        if locked.is_none() {
            return Ok(None);
        }
        if plan.is_noop() {
            tracing::debug!(id, "update with no fields; returning current row");
            return Self::fetch_by_id(conn, id).await;
        }

        if let Some(QueryBuf { sql, params }) = update_champion(id, plan.assignments) {
            tracing::debug!(sql = %sql, params = ?params, "query (tx)");
            let mut query = sqlx::query(&sql);
            for p in params {
                query = p.bind_to(query);
            }
            query.execute(&mut *conn).await?;
        }

        if let Some(roles) = plan.roles {
            tracing::debug!(sql = %DELETE_ROLES, id, "query (tx)");
            sqlx::query(DELETE_ROLES).bind(id).execute(&mut *conn).await?;
            Self::insert_roles(conn, id, &roles).await?;
        }

        Self::fetch_by_id(conn, id).await
    }

    async fn delete_tx(conn: &mut PgConnection, id: i64) -> Result<(), AppError> {
        tracing::debug!(sql = %DELETE_ROLES, id, "query (tx)");
        sqlx::query(DELETE_ROLES).bind(id).execute(&mut *conn).await?;
        tracing::debug!(sql = %DELETE_CHAMPION, id, "query (tx)");
        let deleted = sqlx::query(DELETE_CHAMPION)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
        if deleted == 0 {
            tracing::debug!(id, "delete matched no champion");
        }
        Ok(())
    }
}

/// Commit on success; on any error roll back explicitly and return the original error.
async fn finish<T>(
    tx: Transaction<'static, Postgres>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}

#[async_trait]
impl ChampionRepository for ChampionService {
    async fn list(&self, offset: i64, limit: i64) -> Result<ChampionList, AppError> {
        tracing::debug!(sql = %COUNT_CHAMPIONS, "query");
        let total: i64 = sqlx::query_scalar(COUNT_CHAMPIONS)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(sql = %SELECT_PAGE, limit, offset, "query");
        let rows: Vec<ChampionRow> = sqlx::query_as(SELECT_PAGE)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(ChampionList {
            total,
            champions: rows.into_iter().map(Champion::from).collect(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Champion>, AppError> {
        let mut conn = self.pool.acquire().await?;
        Self::fetch_by_id(&mut conn, id).await
    }

    async fn create(&self, champion: NewChampion) -> Result<Champion, AppError> {
        let mut tx = self.pool.begin().await?;
        let result = Self::insert_tx(&mut tx, &champion).await;
        let created = finish(tx, result).await?;
        tracing::info!(id = created.id, roles = champion.roles.len(), "champion created");
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        input: ChampionInput,
        mode: UpdateMode,
    ) -> Result<Option<Champion>, AppError> {
        let plan = UpdatePlan::stage(&input, mode)?;
        let mut tx = self.pool.begin().await?;
        let result = Self::update_tx(&mut tx, id, plan).await;
        let updated = finish(tx, result).await?;
        if updated.is_some() {
            tracing::info!(id, ?mode, "champion updated");
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let result = Self::delete_tx(&mut tx, id).await;
        finish(tx, result).await?;
        tracing::info!(id, "champion deleted");
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
