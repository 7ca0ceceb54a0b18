//! Seeker profile model and DTOs. A seeker looks for a keeper or a new home
//! for an animal.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// A row from the `seekers` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Seeker {
    pub id: DbId,
    pub user_id: DbId,
    pub description: Option<String>,
    pub animal_type: Option<String>,
    pub city: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeekerResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub description: Option<String>,
    pub animal_type: Option<String>,
    pub city: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Seeker> for SeekerResponse {
    fn from(s: Seeker) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            description: s.description,
            animal_type: s.animal_type,
            city: s.city,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateSeeker {
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(length(max = 64))]
    pub animal_type: Option<String>,
    #[validate(length(max = 64))]
    pub city: Option<String>,
}

impl CreateSeeker {
    pub fn to_domain(&self, user_id: DbId) -> Seeker {
        Seeker {
            user_id,
            description: self.description.clone(),
            animal_type: self.animal_type.clone(),
            city: self.city.clone(),
            ..Seeker::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateSeeker {
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub animal_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
}

impl UpdateSeeker {
    pub fn apply_to(&self, seeker: &mut Seeker) {
        patch(&mut seeker.description, &self.description);
        patch(&mut seeker.animal_type, &self.animal_type);
        patch(&mut seeker.city, &self.city);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeekerFilter {
    pub city: Option<String>,
    pub animal_type: Option<String>,
}

pub const SEEKER_SORT_FIELDS: &[&str] = &["created_at", "updated_at"];
