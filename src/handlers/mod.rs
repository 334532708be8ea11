//! HTTP handlers for post CRUD.

pub mod post;
pub use post::*;
