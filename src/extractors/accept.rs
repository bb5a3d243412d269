//! Content negotiation: this API only speaks JSON.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::ACCEPT, request::Parts},
};

/// Succeeds when the client accepts JSON. A missing `Accept` header counts as `*/*`.
#[derive(Clone, Copy, Debug)]
pub struct AcceptsJson;

pub fn accepts_json(accept: &str) -> bool {
    accept.contains("application/json") || accept.contains("*/*")
}

#[async_trait]
impl<S> FromRequestParts<S> for AcceptsJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(ACCEPT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("*/*");
        if accepts_json(accept) {
            Ok(AcceptsJson)
        } else {
            Err(AppError::NotAcceptable)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_and_wildcards_are_accepted() {
        assert!(accepts_json("application/json"));
        assert!(accepts_json("text/html, application/json;q=0.9"));
        assert!(accepts_json("*/*"));
    }

    #[test]
    fn other_types_are_refused() {
        assert!(!accepts_json("text/html"));
        assert!(!accepts_json("application/xml"));
    }
}
