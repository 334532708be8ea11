//! PostService and request validation.

mod posts;
mod validation;
pub use posts::{last_page, page_offset, PostPage, PostService, PAGE_SIZE};
pub use validation::{FieldError, FieldRule, FieldShape, RequestValidator, CREATE_POST_RULES, UPDATE_POST_RULES};
