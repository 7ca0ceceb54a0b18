//! Veterinarian profile model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// A row from the `vets` table.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Vet {
    pub id: DbId,
    pub user_id: DbId,
    pub clinic_name: String,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub price: Option<i32>,
    pub city: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct VetResponse {
    pub id: DbId,
    pub user_id: DbId,
    pub clinic_name: String,
    pub specialization: Option<String>,
    pub experience_years: i32,
    pub price: Option<i32>,
    pub city: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Vet> for VetResponse {
    fn from(v: Vet) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            clinic_name: v.clinic_name,
            specialization: v.specialization,
            experience_years: v.experience_years,
            price: v.price,
            city: v.city,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateVet {
    #[validate(length(min = 1, max = 200))]
    pub clinic_name: String,
    #[validate(length(max = 200))]
    pub specialization: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0, max = 80))]
    pub experience_years: i32,
    #[validate(range(min = 0))]
    pub price: Option<i32>,
    #[validate(length(max = 64))]
    pub city: Option<String>,
}

impl CreateVet {
    pub fn to_domain(&self, user_id: DbId) -> Vet {
        Vet {
            user_id,
            clinic_name: self.clinic_name.clone(),
            specialization: self.specialization.clone(),
            experience_years: self.experience_years,
            price: self.price,
            city: self.city.clone(),
            ..Vet::default()
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateVet {
    #[validate(length(min = 1, max = 200))]
    pub clinic_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub specialization: Option<Option<String>>,
    #[validate(range(min = 0, max = 80))]
    pub experience_years: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
}

impl UpdateVet {
    pub fn apply_to(&self, vet: &mut Vet) {
        patch(&mut vet.clinic_name, &self.clinic_name);
        patch(&mut vet.specialization, &self.specialization);
        patch(&mut vet.experience_years, &self.experience_years);
        patch(&mut vet.price, &self.price);
        patch(&mut vet.city, &self.city);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VetFilter {
    pub city: Option<String>,
    pub specialization: Option<String>,
}

pub const VET_SORT_FIELDS: &[&str] = &["created_at", "updated_at", "experience_years", "price"];
