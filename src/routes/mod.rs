//! Router assembly.

mod common;
mod posts;

pub use common::common_routes_with_ready;
pub use posts::post_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application: operational routes at the root, post routes under `prefix`.
/// A missing leading `/` on `prefix` is added.
pub fn build_app(state: AppState, prefix: &str, body_limit: usize) -> Router {
    let api = post_routes(state.clone());
    let api = match prefix.trim_matches('/') {
        "" => api,
        p => Router::new().nest(&format!("/{}", p), api),
    };
    Router::new()
        .merge(common_routes_with_ready(state))
        .merge(api)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
