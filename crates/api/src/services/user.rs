//! User accounts.

use chrono::Utc;
use pethaven_core::error::{CoreError, CoreResult};
use pethaven_core::pagination::Page;
use pethaven_core::sorting::{resolve_sort, SortDefaults};
use pethaven_core::types::DbId;
use pethaven_db::models::user::{RegisterUser, UpdateUser, User, UserFilter, USER_SORT_FIELDS};
use pethaven_db::stores::UserStore;

use super::{ensure_owner, stamp};
use crate::auth::password::hash_password;

pub struct UserService<'a, S> {
    store: &'a S,
}

impl<'a, S: UserStore> UserService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Hash the password and create the account.
    pub async fn register(&self, input: &RegisterUser) -> CoreResult<User> {
        let password_hash = hash_password(&input.password)
            .map_err(|e| CoreError::Internal(format!("Password hashing error: {e}")))?;
        let mut user = input.to_domain(password_hash);
        stamp(&mut user.created_at, &mut user.updated_at);
        self.store.create_user(&user).await
    }

    pub async fn get_by_id(&self, id: DbId) -> CoreResult<User> {
        self.store.find_user(id).await
    }

    pub async fn list(
        &self,
        filter: &UserFilter,
        sort: Option<&str>,
        page: Page,
        defaults: &SortDefaults,
    ) -> CoreResult<Vec<User>> {
        let sort = resolve_sort(sort, USER_SORT_FIELDS, defaults)?;
        self.store.list_users(filter, &sort, page).await
    }

    /// Users may only edit their own profile.
    pub async fn update(&self, actor: DbId, id: DbId, input: &UpdateUser) -> CoreResult<User> {
        ensure_owner(actor, id, "Account")?;
        let mut user = self.store.find_user(id).await?;
        input.apply_to(&mut user);
        user.updated_at = Utc::now();
        self.store.update_user(&user).await
    }

    pub async fn delete(&self, actor: DbId, id: DbId) -> CoreResult<()> {
        ensure_owner(actor, id, "Account")?;
        self.store.soft_delete_user(id).await
    }
}
