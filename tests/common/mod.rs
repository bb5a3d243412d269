#![allow(dead_code)]

use async_trait::async_trait;
use champions_api::service::UpdatePlan;
use champions_api::{
    app, AppConfig, AppError, AppState, Champion, ChampionInput, ChampionList, ChampionRepository,
    NewChampion, UpdateMode,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

pub const ROLES: [(i64, &str); 6] = [
    (1, "Mage"),
    (2, "Fighter"),
    (3, "Tank"),
    (4, "Assassin"),
    (5, "Marksman"),
    (6, "Support"),
];
pub const DIFFICULTIES: [(i64, &str); 3] = [(1, "Low"), (2, "Moderate"), (3, "High")];

#[derive(Clone, Debug)]
struct Row {
    name: String,
    title: String,
    description: String,
    difficulty: i64,
    roles: Vec<i64>,
}

#[derive(Default)]
struct Tables {
    next_id: i64,
    champions: BTreeMap<i64, Row>,
}

/// Repository over in-process tables seeded with the reference lookups.
#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

fn label(table: &[(i64, &str)], id: i64) -> Option<String> {
    table.iter().find(|(k, _)| *k == id).map(|(_, v)| v.to_string())
}

fn unknown_reference(what: &str, id: i64) -> AppError {
    AppError::Internal(format!("{} {} violates foreign key", what, id))
}

fn check_refs(difficulty: i64, roles: &[i64]) -> Result<(), AppError> {
    if label(&DIFFICULTIES, difficulty).is_none() {
        return Err(unknown_reference("difficulty", difficulty));
    }
    if let Some(bad) = roles.iter().find(|r| label(&ROLES, **r).is_none()) {
        return Err(unknown_reference("role", *bad));
    }
    Ok(())
}

fn render(id: i64, row: &Row) -> Champion {
    let mut role_ids = row.roles.clone();
    role_ids.sort_unstable();
    Champion {
        id,
        name: row.name.clone(),
        title: row.title.clone(),
        roles: role_ids.into_iter().filter_map(|r| label(&ROLES, r)).collect(),
        description: row.description.clone(),
        difficulty: label(&DIFFICULTIES, row.difficulty),
    }
}

impl MemoryRepository {
    pub fn len(&self) -> usize {
        self.tables.lock().unwrap().champions.len()
    }
}

#[async_trait]
impl ChampionRepository for MemoryRepository {
    async fn list(&self, offset: i64, limit: i64) -> Result<ChampionList, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(ChampionList {
            total: tables.champions.len() as i64,
            champions: tables
                .champions
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .map(|(id, row)| render(*id, row))
                .collect(),
        })
    }

    async fn get(&self, id: i64) -> Result<Option<Champion>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.champions.get(&id).map(|row| render(id, row)))
    }

    async fn create(&self, champion: NewChampion) -> Result<Champion, AppError> {
        check_refs(champion.difficulty, &champion.roles)?;
        let mut tables = self.tables.lock().unwrap();
        tables.next_id += 1;
        let id = tables.next_id;
        let row = Row {
            name: champion.name,
            title: champion.title,
            description: champion.description,
            difficulty: champion.difficulty,
            roles: champion.roles,
        };
        let rendered = render(id, &row);
        tables.champions.insert(id, row);
        Ok(rendered)
    }

    async fn update(
        &self,
        id: i64,
        input: ChampionInput,
        mode: UpdateMode,
    ) -> Result<Option<Champion>, AppError> {
        UpdatePlan::stage(&input, mode)?;
        let mut tables = self.tables.lock().unwrap();
        let Some(current) = tables.champions.get(&id) else {
            return Ok(None);
        };
        let mut next = current.clone();
        if let Some(v) = input.name {
            next.name = v;
        }
        if let Some(v) = input.title {
            next.title = v;
        }
        if let Some(v) = input.description {
            next.description = v;
        }
        if let Some(v) = input.difficulty {
            next.difficulty = v;
        }
        if let Some(roles) = input.roles {
            next.roles = champions_api::service::dedup_ids(&roles);
        }
        check_refs(next.difficulty, &next.roles)?;
        let rendered = render(id, &next);
        tables.champions.insert(id, next);
        Ok(Some(rendered))
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.tables.lock().unwrap().champions.remove(&id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Every call fails the way a lost database connection would.
pub struct UnavailableRepository;

#[async_trait]
impl ChampionRepository for UnavailableRepository {
    async fn list(&self, _: i64, _: i64) -> Result<ChampionList, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn get(&self, _: i64) -> Result<Option<Champion>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn create(&self, _: NewChampion) -> Result<Champion, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn update(&self, _: i64, _: ChampionInput, _: UpdateMode) -> Result<Option<Champion>, AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn delete(&self, _: i64) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Db(sqlx::Error::PoolTimedOut))
    }
}

pub fn router_with(repo: Arc<dyn ChampionRepository>, config: &AppConfig) -> axum::Router {
    app(AppState::new(repo, config))
}

/// Router over a fresh in-memory repository; the repository handle is returned for inspection.
pub fn memory_router() -> (axum::Router, Arc<MemoryRepository>) {
    let repo = Arc::new(MemoryRepository::default());
    (router_with(repo.clone(), &AppConfig::default()), repo)
}
