//! Keeper review model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// A row from the `keeper_reviews` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct KeeperReview {
    pub id: DbId,
    pub keeper_id: DbId,
    pub author_id: DbId,
    pub grade: i16,
    pub comment: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: DbId,
    pub keeper_id: DbId,
    pub author_id: DbId,
    pub grade: i16,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<KeeperReview> for ReviewResponse {
    fn from(r: KeeperReview) -> Self {
        Self {
            id: r.id,
            keeper_id: r.keeper_id,
            author_id: r.author_id,
            grade: r.grade,
            comment: r.comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Grade bounds are a business rule checked by the review service, not here.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateReview {
    pub grade: i16,
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

impl CreateReview {
    pub fn to_domain(&self, keeper_id: DbId, author_id: DbId) -> KeeperReview {
        KeeperReview {
            keeper_id,
            author_id,
            grade: self.grade,
            comment: self.comment.clone(),
            ..KeeperReview::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReview {
    pub grade: Option<i16>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
}

impl UpdateReview {
    pub fn apply_to(&self, review: &mut KeeperReview) {
        patch(&mut review.grade, &self.grade);
        patch(&mut review.comment, &self.comment);
    }
}

pub const REVIEW_SORT_FIELDS: &[&str] = &["created_at", "updated_at", "grade"];
