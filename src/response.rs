//! Response envelopes: pretty JSON writer, HATEOAS links, pagination.

use crate::model::{Champion, ChampionList};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Page used by the `all_champions` link on every item.
pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Write `data` as pretty-printed JSON with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_vec_pretty(data) {
        Ok(bytes) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "response serialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "application/json")],
                r#"{"error":"Internal Server Error"}"#,
            )
                .into_response()
        }
    }
}

/// Builds resource URLs under `{base_path}/api/v1/champions`.
#[derive(Clone, Debug)]
pub struct LinkBuilder {
    collection: String,
}

impl LinkBuilder {
    pub fn new(base_path: &str) -> Self {
        LinkBuilder {
            collection: format!("{}/api/v1/champions", base_path.trim_end_matches('/')),
        }
    }

    pub fn item(&self, id: i64) -> String {
        format!("{}/{}", self.collection, id)
    }

    pub fn page(&self, offset: i64, limit: i64) -> String {
        format!("{}?offset={}&limit={}", self.collection, offset, limit)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChampionLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub all_champions: String,
}

/// A champion with its links, as sent to clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChampionResource {
    #[serde(flatten)]
    pub champion: Champion,
    pub links: ChampionLinks,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChampionPage {
    pub count: i64,
    pub previous: Option<String>,
    pub next: Option<String>,
    pub champions: Vec<ChampionResource>,
}

pub fn with_links(champion: Champion, links: &LinkBuilder) -> ChampionResource {
    let self_link = links.item(champion.id);
    ChampionResource {
        champion,
        links: ChampionLinks {
            self_link,
            all_champions: links.page(DEFAULT_OFFSET, DEFAULT_LIMIT),
        },
    }
}

/// Pagination envelope. `previous` exists iff offset > 0; `next` iff offset + limit < total.
pub fn paginate(list: ChampionList, offset: i64, limit: i64, links: &LinkBuilder) -> ChampionPage {
    let total = list.total;
    ChampionPage {
        count: total,
        previous: (offset > 0).then(|| links.page((offset - limit).max(0), limit)),
        next: (offset.saturating_add(limit) < total)
            .then(|| links.page(offset.saturating_add(limit), limit)),
        champions: list
            .champions
            .into_iter()
            .map(|c| with_links(c, links))
            .collect(),
    }
}
