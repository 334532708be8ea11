//! Post entity and its create/update inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Characters of `body` kept in list output.
pub const LIST_BODY_LIMIT: usize = 200;
/// Appended to a body cut at [`LIST_BODY_LIMIT`].
pub const CONTINUATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub published_date: DateTime<Utc>,
}

impl Post {
    /// Copy for list output: `body` cut to [`LIST_BODY_LIMIT`] chars plus the marker when longer.
    pub fn to_list_view(&self) -> Post {
        Post {
            body: truncate_body(&self.body),
            ..self.clone()
        }
    }
}

pub fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(LIST_BODY_LIMIT) {
        Some((cut, _)) => format!("{}{}", &body[..cut], CONTINUATION_MARKER),
        None => body.to_string(),
    }
}

/// Fields a client supplies on create. `id` and `published_date` are assigned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
        if let Some(tags) = self.tags {
            post.tags = tags;
        }
    }
}
