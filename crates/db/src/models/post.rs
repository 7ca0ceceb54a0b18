//! Post model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// A row from the `posts` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub body: String,
    pub animal_type: Option<String>,
    pub city: Option<String>,
    /// One of `draft`, `published`, `blocked`, `archived`.
    pub status: String,
    /// Number of reports filed against the post. Maintained by the report store.
    pub reports_count: i32,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub body: String,
    pub animal_type: Option<String>,
    pub city: Option<String>,
    pub status: String,
    pub reports_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Post> for PostResponse {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            author_id: p.author_id,
            title: p.title,
            body: p.body,
            animal_type: p.animal_type,
            city: p.city,
            status: p.status,
            reports_count: p.reports_count,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10000))]
    pub body: String,
    #[validate(length(max = 64))]
    pub animal_type: Option<String>,
    #[validate(length(max = 64))]
    pub city: Option<String>,
    /// Left empty when omitted; the service substitutes `published`.
    pub status: Option<String>,
}

impl CreatePost {
    pub fn to_domain(&self, author_id: DbId) -> Post {
        Post {
            author_id,
            title: self.title.clone(),
            body: self.body.clone(),
            animal_type: self.animal_type.clone(),
            city: self.city.clone(),
            status: self.status.clone().unwrap_or_default(),
            ..Post::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePost {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10000))]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub animal_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    pub status: Option<String>,
}

impl UpdatePost {
    pub fn apply_to(&self, post: &mut Post) {
        patch(&mut post.title, &self.title);
        patch(&mut post.body, &self.body);
        patch(&mut post.animal_type, &self.animal_type);
        patch(&mut post.city, &self.city);
        patch(&mut post.status, &self.status);
    }
}

/// Query filters for `GET /posts`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFilter {
    pub author_id: Option<DbId>,
    pub status: Option<String>,
    pub city: Option<String>,
    pub animal_type: Option<String>,
    /// Set by the service, never by the client: restricts results to
    /// published posts plus the given user's own posts. `None` means
    /// unrestricted (moderators).
    #[serde(skip)]
    pub visible_to: Option<DbId>,
}

pub const POST_SORT_FIELDS: &[&str] = &["created_at", "updated_at", "reports_count", "title"];
