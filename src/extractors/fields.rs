//! Request body as a flat field map, from JSON, urlencoded or multipart bodies.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use serde_json::{Map, Value};

/// Merged request fields. Form fields win over JSON fields with the same key.
#[derive(Clone, Debug, Default)]
pub struct RequestFields(pub Map<String, Value>);

/// A JSON body that is not an object contributes no fields.
pub fn parse_json_object(bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// Form keys that always collect into a list, bracketed or not.
const LIST_KEYS: [&str; 1] = ["roles"];

/// Overlay form pairs on JSON fields. List keys and keys ending in `[]` accumulate into an
/// array under the bare key; other repeated keys keep the last value.
pub fn merge_fields(mut json: Map<String, Value>, form: Vec<(String, String)>) -> Map<String, Value> {
    let mut overlay = Map::new();
    for (key, value) in form {
        let list_key = match key.strip_suffix("[]") {
            Some(bare) => Some(bare.to_owned()),
            None if LIST_KEYS.contains(&key.as_str()) => Some(key.clone()),
            None => None,
        };
        match list_key {
            Some(bare) => {
                let slot = overlay
                    .entry(bare)
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot {
                    Value::Array(items) => items.push(Value::String(value)),
                    other => *other = Value::Array(vec![Value::String(value)]),
                }
            }
            None => {
                overlay.insert(key, Value::String(value));
            }
        }
    }
    json.extend(overlay);
    json
}

fn rejection(status: StatusCode, text: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(text)
    }
}

async fn multipart_pairs(mut multipart: Multipart) -> Result<Vec<(String, String)>, AppError> {
    let mut pairs = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| rejection(e.status(), e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        if field.file_name().is_some() {
            continue;
        }
        let text = field
            .text()
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        pairs.push((name, text));
    }
    Ok(pairs)
}

#[async_trait]
impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            return Ok(RequestFields(merge_fields(Map::new(), pairs)));
        }

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejection(e.status(), e.body_text()))?;
            let pairs = multipart_pairs(multipart).await?;
            return Ok(RequestFields(merge_fields(Map::new(), pairs)));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text()))?;
        Ok(RequestFields(parse_json_object(&bytes)))
    }
}
