//! User entity model and DTOs.

use pethaven_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, patch};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub is_moderator: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub about: Option<String>,
    pub is_moderator: bool,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            city: user.city,
            phone: user.phone,
            about: user.about,
            is_moderator: user.is_moderator,
            created_at: user.created_at,
        }
    }
}

/// Request body for registering a new account.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub last_name: String,
    #[validate(length(max = 64))]
    pub city: Option<String>,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    #[validate(length(max = 2000))]
    pub about: Option<String>,
}

impl RegisterUser {
    /// Build a user record. The plaintext password never enters the record;
    /// the caller supplies the hash.
    pub fn to_domain(&self, password_hash: String) -> User {
        User {
            username: self.username.clone(),
            email: self.email.clone(),
            password_hash,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            city: self.city.clone(),
            phone: self.phone.clone(),
            about: self.about.clone(),
            ..User::default()
        }
    }
}

/// Partial profile update. Absent fields are left untouched; `null` clears
/// nullable fields.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(min = 3, max = 32))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 64))]
    pub first_name: Option<String>,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub about: Option<Option<String>>,
}

impl UpdateUser {
    pub fn apply_to(&self, user: &mut User) {
        patch(&mut user.username, &self.username);
        patch(&mut user.email, &self.email);
        patch(&mut user.first_name, &self.first_name);
        patch(&mut user.last_name, &self.last_name);
        patch(&mut user.city, &self.city);
        patch(&mut user.phone, &self.phone);
        patch(&mut user.about, &self.about);
    }
}

/// Query filters for `GET /users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserFilter {
    pub city: Option<String>,
}

/// Columns a user list may be sorted by.
pub const USER_SORT_FIELDS: &[&str] = &["created_at", "updated_at", "username"];
