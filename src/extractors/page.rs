//! `offset` / `limit` query parameters for the champion list.

use crate::error::AppError;
use crate::response::{DEFAULT_LIMIT, DEFAULT_OFFSET};
use axum::extract::Query;
use axum::http::Uri;
use std::collections::HashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageParams {
    pub offset: i64,
    pub limit: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        PageParams {
            offset: DEFAULT_OFFSET,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Negative offsets clamp to 0. Limit has no upper cap but must not be negative.
    pub fn from_query(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let mut page = PageParams::default();
        if let Some(raw) = params.get("offset") {
            page.offset = parse_param("offset", raw)?.max(0);
        }
        if let Some(raw) = params.get("limit") {
            let limit = parse_param("limit", raw)?;
            if limit < 0 {
                return Err(invalid("limit"));
            }
            page.limit = limit;
        }
        Ok(page)
    }

    pub fn from_uri(uri: &Uri) -> Result<Self, AppError> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        Self::from_query(&params)
    }
}

fn invalid(name: &str) -> AppError {
    AppError::BadRequest(format!("Invalid query parameter: {}", name))
}

fn parse_param(name: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| invalid(name))
}
