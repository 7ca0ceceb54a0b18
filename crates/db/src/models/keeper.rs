//! Keeper profile model and DTOs.
//!
//! A keeper fosters animals. `rating` is the average of the keeper's live
//! review grades and is maintained by the review store, never by clients.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// A row from the `keepers` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Keeper {
    pub id: DbId,
    pub user_id: DbId,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub has_cage: bool,
    pub boarding_capacity: i32,
    pub animal_types: Option<String>,
    pub city: Option<String>,
    pub rating: f64,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeeperResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub description: Option<String>,
    pub price: Option<i32>,
    pub has_cage: bool,
    pub boarding_capacity: i32,
    pub animal_types: Option<String>,
    pub city: Option<String>,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Keeper> for KeeperResponse {
    fn from(k: Keeper) -> Self {
        Self {
            id: k.id,
            user_id: k.user_id,
            description: k.description,
            price: k.price,
            has_cage: k.has_cage,
            boarding_capacity: k.boarding_capacity,
            animal_types: k.animal_types,
            city: k.city,
            rating: k.rating,
            created_at: k.created_at,
            updated_at: k.updated_at,
        }
    }
}

/// DTO for creating the caller's keeper profile.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateKeeper {
    #[validate(length(max = 4000))]
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i32>,
    #[serde(default)]
    pub has_cage: bool,
    #[validate(range(min = 0, max = 50))]
    pub boarding_capacity: Option<i32>,
    #[validate(length(max = 255))]
    pub animal_types: Option<String>,
    #[validate(length(max = 64))]
    pub city: Option<String>,
}

impl CreateKeeper {
    pub fn to_domain(&self, user_id: DbId) -> Keeper {
        Keeper {
            user_id,
            description: self.description.clone(),
            price: self.price,
            has_cage: self.has_cage,
            boarding_capacity: self.boarding_capacity.unwrap_or_default(),
            animal_types: self.animal_types.clone(),
            city: self.city.clone(),
            ..Keeper::default()
        }
    }
}

/// DTO for partially updating a keeper profile.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateKeeper {
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<i32>>,
    pub has_cage: Option<bool>,
    #[validate(range(min = 0, max = 50))]
    pub boarding_capacity: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub animal_types: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
}

impl UpdateKeeper {
    pub fn apply_to(&self, keeper: &mut Keeper) {
        patch(&mut keeper.description, &self.description);
        patch(&mut keeper.price, &self.price);
        patch(&mut keeper.has_cage, &self.has_cage);
        patch(&mut keeper.boarding_capacity, &self.boarding_capacity);
        patch(&mut keeper.animal_types, &self.animal_types);
        patch(&mut keeper.city, &self.city);
    }
}

/// Query filters for `GET /keepers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeeperFilter {
    pub city: Option<String>,
    pub has_cage: Option<bool>,
    pub min_rating: Option<f64>,
}

/// Columns a keeper list may be sorted by.
pub const KEEPER_SORT_FIELDS: &[&str] =
    &["created_at", "updated_at", "rating", "price", "boarding_capacity"];
