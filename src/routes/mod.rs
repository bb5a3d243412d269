//! Routers: operational endpoints plus the versioned API.

pub mod api;
pub mod common;

pub use api::{api_routes, parse_route, ApiRoute, ApiVersion, Resource};
pub use common::common_routes;

use crate::state::AppState;
use axum::Router;

/// Full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
}
