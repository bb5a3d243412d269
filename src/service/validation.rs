//! Boundary validation: untyped request fields into typed champion payloads, and update staging.

use crate::error::AppError;
use crate::model::{ChampionField, ChampionInput, NewChampion, UpdateMode};
use crate::sql::SqlParam;
use serde_json::{Map, Value};
use std::collections::HashSet;

impl TryFrom<&Map<String, Value>> for ChampionInput {
    type Error = AppError;

    /// Null counts as absent. Ids may arrive as numbers or numeric strings (form bodies).
    fn try_from(fields: &Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(ChampionInput {
            name: text_field(fields, ChampionField::Name)?,
            title: text_field(fields, ChampionField::Title)?,
            description: text_field(fields, ChampionField::Description)?,
            difficulty: fields
                .get(ChampionField::Difficulty.as_str())
                .filter(|v| !v.is_null())
                .map(|v| parse_id(v).ok_or_else(|| invalid("difficulty")))
                .transpose()?,
            roles: fields
                .get("roles")
                .filter(|v| !v.is_null())
                .map(parse_role_ids)
                .transpose()?,
        })
    }
}

impl NewChampion {
    /// Every mutable field must be present to create a champion. Roles default to none.
    pub fn from_input(input: ChampionInput) -> Result<Self, AppError> {
        let missing = |f: ChampionField| AppError::MissingField(f.as_str());
        Ok(NewChampion {
            name: input.name.ok_or_else(|| missing(ChampionField::Name))?,
            title: input.title.ok_or_else(|| missing(ChampionField::Title))?,
            description: input.description.ok_or_else(|| missing(ChampionField::Description))?,
            difficulty: input.difficulty.ok_or_else(|| missing(ChampionField::Difficulty))?,
            roles: dedup_ids(&input.roles.unwrap_or_default()),
        })
    }
}

/// Column assignments and role replacement for one update, decided before any write.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdatePlan {
    pub assignments: Vec<(ChampionField, SqlParam)>,
    /// `Some` replaces the role set (empty clears it); `None` leaves roles untouched.
    pub roles: Option<Vec<i64>>,
}

impl UpdatePlan {
    pub fn stage(input: &ChampionInput, mode: UpdateMode) -> Result<Self, AppError> {
        let mut assignments = Vec::with_capacity(ChampionField::ALL.len());
        for field in ChampionField::ALL {
            let value = match field {
                ChampionField::Name => input.name.clone().map(SqlParam::Text),
                ChampionField::Title => input.title.clone().map(SqlParam::Text),
                ChampionField::Description => input.description.clone().map(SqlParam::Text),
                ChampionField::Difficulty => input.difficulty.map(SqlParam::BigInt),
            };
            match (value, mode) {
                (Some(v), _) => assignments.push((field, v)),
                (None, UpdateMode::Partial) => continue,
                (None, UpdateMode::Full) => return Err(AppError::MissingField(field.as_str())),
            }
        }
        Ok(UpdatePlan {
            assignments,
            roles: input.roles.as_deref().map(dedup_ids),
        })
    }

    pub fn is_noop(&self) -> bool {
        self.assignments.is_empty() && self.roles.is_none()
    }
}

/// Set semantics over role ids, keeping first-seen order.
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn invalid(key: &str) -> AppError {
    AppError::BadRequest(format!("Invalid field: {}", key))
}

fn text_field(fields: &Map<String, Value>, field: ChampionField) -> Result<Option<String>, AppError> {
    match fields.get(field.as_str()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(field.as_str())),
    }
}

fn parse_id(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A list of ids, or a single scalar id treated as a one-element list.
fn parse_role_ids(v: &Value) -> Result<Vec<i64>, AppError> {
    match v {
        Value::Array(items) => items
            .iter()
            .map(|item| parse_id(item).ok_or_else(|| invalid("roles")))
            .collect(),
        scalar => parse_id(scalar).map(|id| vec![id]).ok_or_else(|| invalid("roles")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn input(v: Value) -> ChampionInput {
        ChampionInput::try_from(&fields(v)).unwrap()
    }

    #[test]
    fn parses_json_and_form_shaped_values() {
        let from_json = input(json!({
            "name": "Ahri", "title": "Nine-Tailed Fox", "description": "...",
            "difficulty": 2, "roles": [1, 4]
        }));
        let from_form = input(json!({
            "name": "Ahri", "title": "Nine-Tailed Fox", "description": "...",
            "difficulty": "2", "roles": ["1", " 4"]
        }));
        assert_eq!(from_json, from_form);
        assert_eq!(from_json.roles, Some(vec![1, 4]));
    }

    #[test]
    fn null_is_absent_and_scalar_roles_become_a_list() {
        let parsed = input(json!({ "title": null, "roles": 3 }));
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.roles, Some(vec![3]));
        assert_eq!(input(json!({ "roles": null })).roles, None);
    }

    #[test]
    fn rejects_values_that_cannot_be_typed() {
        let err = ChampionInput::try_from(&fields(json!({ "difficulty": "hard" }))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: difficulty");
        let err = ChampionInput::try_from(&fields(json!({ "roles": [1, "x"] }))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: roles");
        let err = ChampionInput::try_from(&fields(json!({ "name": 12 }))).unwrap_err();
        assert_eq!(err.to_string(), "Invalid field: name");
    }

    #[test]
    fn create_requires_every_field_and_dedups_roles() {
        let err = NewChampion::from_input(input(json!({ "name": "Ahri", "title": "t", "description": "d" })))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingField("difficulty")));

        let new = NewChampion::from_input(input(json!({
            "name": "Ahri", "title": "t", "description": "d", "difficulty": 2, "roles": [4, 1, 4]
        })))
        .unwrap();
        assert_eq!(new.roles, vec![4, 1]);
    }

    #[test]
    fn partial_staging_skips_absent_fields() {
        let plan = UpdatePlan::stage(&input(json!({ "title": "X" })), UpdateMode::Partial).unwrap();
        assert_eq!(plan.assignments, vec![(ChampionField::Title, SqlParam::Text("X".into()))]);
        assert_eq!(plan.roles, None);
    }

    #[test]
    fn full_staging_reports_the_first_missing_field() {
        let err = UpdatePlan::stage(
            &input(json!({ "name": "n", "title": "t", "description": "d" })),
            UpdateMode::Full,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::MissingField("difficulty")));
    }

    #[test]
    fn roles_key_replaces_in_either_mode() {
        let cleared = UpdatePlan::stage(&input(json!({ "roles": [] })), UpdateMode::Partial).unwrap();
        assert_eq!(cleared.roles, Some(vec![]));
        assert!(!cleared.is_noop());

        let full = UpdatePlan::stage(
            &input(json!({ "name": "n", "title": "t", "description": "d", "difficulty": 1, "roles": [3, 2, 3] })),
            UpdateMode::Full,
        )
        .unwrap();
        assert_eq!(full.roles, Some(vec![3, 2]));
        assert_eq!(full.assignments.len(), 4);
    }

    #[test]
    fn empty_patch_is_a_noop() {
        assert!(UpdatePlan::stage(&ChampionInput::default(), UpdateMode::Partial).unwrap().is_noop());
    }
}
