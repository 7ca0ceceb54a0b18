//! Post publication status.
//!
//! Stored as lower-case text in `posts.status`; the column carries a CHECK
//! constraint with the same four values.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    Draft,
    #[default]
    Published,
    /// Hidden by moderation. Only moderators set or clear it.
    Blocked,
    Archived,
}

impl PostStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Blocked => "blocked",
            PostStatus::Archived => "archived",
        }
    }

    /// Whether an author may move their own post into this status.
    pub fn is_author_settable(self) -> bool {
        !matches!(self, PostStatus::Blocked)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            "blocked" => Ok(PostStatus::Blocked),
            "archived" => Ok(PostStatus::Archived),
            other => Err(CoreError::Validation(format!(
                "Unknown post status '{other}'"
            ))),
        }
    }
}
