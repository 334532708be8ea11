//! Post CRUD routes.

use crate::handlers::post::{create, list, read, remove, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn post_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(list).post(create))
        .route("/posts/:id", get(read).patch(update).delete(remove))
        .with_state(state)
}
