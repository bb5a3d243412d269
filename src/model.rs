//! Champion representations and typed request payloads.

use serde::{Deserialize, Serialize};

/// A champion as read back from the database, with difficulty and roles resolved to labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Champion {
    pub id: i64,
    pub name: String,
    pub title: String,
    /// Role labels ordered by role id, without duplicates. Empty when the champion has no roles.
    pub roles: Vec<String>,
    pub description: String,
    /// Difficulty label (never the raw id).
    pub difficulty: Option<String>,
}

/// One page of champions plus the unfiltered table count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChampionList {
    pub total: i64,
    pub champions: Vec<Champion>,
}

/// Mutable champion columns, in the order they are validated and written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChampionField {
    Name,
    Title,
    Description,
    Difficulty,
}

impl ChampionField {
    pub const ALL: [ChampionField; 4] = [
        ChampionField::Name,
        ChampionField::Title,
        ChampionField::Description,
        ChampionField::Difficulty,
    ];

    /// Body key and column name.
    pub fn as_str(self) -> &'static str {
        match self {
            ChampionField::Name => "name",
            ChampionField::Title => "title",
            ChampionField::Description => "description",
            ChampionField::Difficulty => "difficulty",
        }
    }
}

/// Request payload for create/update. `None` means the key was absent (or null).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChampionInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<i64>,
    pub roles: Option<Vec<i64>>,
}

/// Fully specified champion for insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewChampion {
    pub name: String,
    pub title: String,
    pub description: String,
    pub difficulty: i64,
    /// Role ids, deduplicated.
    pub roles: Vec<i64>,
}

/// PUT replaces every mutable field; PATCH touches only what was sent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}
