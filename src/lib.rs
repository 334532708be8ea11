//! Posts API: REST CRUD for post records over a pluggable document store.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use model::{NewPost, Post, PostPatch};
pub use routes::{build_app, common_routes_with_ready, post_routes};
pub use service::{PostService, PAGE_SIZE};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryPostStore, PgPostStore, PostStore, StoreError};
