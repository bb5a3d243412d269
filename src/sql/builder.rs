//! Champion statements. Identifiers are fixed; values always go through parameters.

use crate::model::ChampionField;
use crate::sql::SqlParam;

/// Shared projection: one row per champion, roles aggregated into a JSON array ordered by role id.
macro_rules! champion_select {
    ($tail:literal) => {
        concat!(
            "SELECT c.id, c.name, c.title, ",
            "COALESCE(json_agg(r.role ORDER BY r.id) FILTER (WHERE r.id IS NOT NULL), '[]'::json) AS roles, ",
            "c.description, d.difficulty AS difficulty ",
            "FROM champions c ",
            "LEFT JOIN champs_roles cr ON cr.champion_id = c.id ",
            "LEFT JOIN roles r ON r.id = cr.role_id ",
            "LEFT JOIN difficulties d ON d.id = c.difficulty ",
            $tail
        )
    };
}

/// Page of champions ordered by id. Params: $1 limit, $2 offset.
pub const SELECT_PAGE: &str =
    champion_select!("GROUP BY c.id, d.difficulty ORDER BY c.id LIMIT $1 OFFSET $2");

/// One champion. Params: $1 id.
pub const SELECT_BY_ID: &str = champion_select!("WHERE c.id = $1 GROUP BY c.id, d.difficulty");

pub const COUNT_CHAMPIONS: &str = "SELECT COUNT(*) FROM champions";

/// Params: $1 name, $2 title, $3 description, $4 difficulty id. Returns the generated id.
pub const INSERT_CHAMPION: &str =
    "INSERT INTO champions (name, title, description, difficulty) VALUES ($1, $2, $3, $4) RETURNING id";

/// Batch insert of join rows. Params: $1 champion id, $2 role ids.
pub const INSERT_ROLES: &str =
    "INSERT INTO champs_roles (champion_id, role_id) SELECT $1, UNNEST($2::bigint[])";

pub const DELETE_ROLES: &str = "DELETE FROM champs_roles WHERE champion_id = $1";

pub const DELETE_CHAMPION: &str = "DELETE FROM champions WHERE id = $1";

/// Row lock taken at the start of an update so concurrent writers serialize on the champion.
pub const LOCK_CHAMPION: &str = "SELECT id FROM champions WHERE id = $1 FOR UPDATE";

pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

/// UPDATE by id: SET only the staged columns. Returns None when nothing is staged.
pub fn update_champion(id: i64, assignments: Vec<(ChampionField, SqlParam)>) -> Option<QueryBuf> {
    if assignments.is_empty() {
        return None;
    }
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(assignments.len());
    for (field, value) in assignments {
        let n = q.push_param(value);
        sets.push(format!("{} = ${}", field.as_str(), n));
    }
    let id_param = q.push_param(SqlParam::BigInt(id));
    q.sql = format!(
        "UPDATE champions SET {} WHERE id = ${}",
        sets.join(", "),
        id_param
    );
    Some(q)
}
