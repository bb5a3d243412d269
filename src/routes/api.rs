//! Versioned API dispatch: `{base}/api/{version}/{resource}[/{id}]`.
//! A static match over path segments picks the controller; the controller branches on method.

use crate::error::AppError;
use crate::extractors::AcceptsJson;
use crate::handlers::ChampionController;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiVersion {
    V1,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Champions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ApiRoute {
    pub version: ApiVersion,
    pub resource: Resource,
    pub id: Option<i64>,
}

fn parse_version(segment: Option<&str>) -> Result<ApiVersion, AppError> {
    match segment {
        Some("v1") => Ok(ApiVersion::V1),
        // v2 is reserved but not served yet.
        _ => Err(AppError::BadRequest("API version not supported".into())),
    }
}

fn parse_resource(version: ApiVersion, segment: Option<&str>) -> Result<Resource, AppError> {
    match (version, segment) {
        (ApiVersion::V1, Some("champions")) => Ok(Resource::Champions),
        _ => Err(AppError::NotFound("Resource not found".into())),
    }
}

fn parse_id(segment: Option<&str>) -> Result<Option<i64>, AppError> {
    match segment {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .map(Some)
            .ok_or_else(|| AppError::BadRequest("Invalid ID".into())),
    }
}

/// Strip `base_path`, then read segments: `api`, version, resource, optional id. Extra segments are ignored.
pub fn parse_route(path: &str, base_path: &str) -> Result<ApiRoute, AppError> {
    let path = if base_path.is_empty() {
        path
    } else {
        path.strip_prefix(base_path).unwrap_or(path)
    };
    let mut segments = path.trim_matches('/').split('/');
    if segments.next() != Some("api") {
        return Err(AppError::NotFound("Not Found".into()));
    }
    let version = parse_version(segments.next())?;
    let resource = parse_resource(version, segments.next())?;
    let id = parse_id(segments.next())?;
    Ok(ApiRoute {
        version,
        resource,
        id,
    })
}

async fn dispatch(
    State(state): State<AppState>,
    _accepts: AcceptsJson,
    req: Request,
) -> Result<Response, AppError> {
    let route = parse_route(req.uri().path(), &state.base_path)?;
    tracing::debug!(method = %req.method(), ?route, "dispatch");
    match (route.version, route.resource) {
        (ApiVersion::V1, Resource::Champions) => {
            ChampionController::new(&state).handle(route.id, req).await
        }
    }
}

/// The body limit layer rejects oversized `Content-Length` bodies with plain text before
/// `dispatch` runs; rewrite those into the JSON error body.
async fn json_payload_too_large(req: Request, next: Next) -> Response {
    let resp = next.run(req).await;
    let is_json = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if resp.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json {
        return AppError::PayloadTooLarge.into_response();
    }
    resp
}

/// Every path not claimed by another router goes through `dispatch`.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .fallback(dispatch)
        .layer(RequestBodyLimitLayer::new(state.body_limit))
        .layer(middleware::from_fn(json_payload_too_large))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: &str) -> Result<ApiRoute, AppError> {
        parse_route(path, "")
    }

    #[test]
    fn collection_and_item_paths() {
        assert_eq!(
            route("/api/v1/champions").unwrap(),
            ApiRoute { version: ApiVersion::V1, resource: Resource::Champions, id: None }
        );
        assert_eq!(route("/api/v1/champions/").unwrap().id, None);
        assert_eq!(route("/api/v1/champions/50").unwrap().id, Some(50));
        assert_eq!(route("/api/v1/champions/50/extra").unwrap().id, Some(50));
    }

    #[test]
    fn base_path_is_stripped() {
        let r = parse_route("/league-of-legends/api/v1/champions/3", "/league-of-legends").unwrap();
        assert_eq!(r.id, Some(3));
        assert!(parse_route("/api/v1/champions", "/league-of-legends").is_ok());
    }

    #[test]
    fn routing_errors_in_order() {
        assert_eq!(route("/v1/champions").unwrap_err().to_string(), "Not Found");
        assert_eq!(route("/").unwrap_err().to_string(), "Not Found");
        assert_eq!(route("/api").unwrap_err().to_string(), "API version not supported");
        assert_eq!(route("/api/v2/champions").unwrap_err().to_string(), "API version not supported");
        assert_eq!(route("/api/v1/roles").unwrap_err().to_string(), "Resource not found");
        assert_eq!(route("/api/v1").unwrap_err().to_string(), "Resource not found");
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(route("/api/v1/champions/abc").unwrap_err().to_string(), "Invalid ID");
        assert_eq!(route("/api/v1/champions/0").unwrap_err().to_string(), "Invalid ID");
        assert_eq!(route("/api/v1/champions/-4").unwrap_err().to_string(), "Invalid ID");
    }
}
