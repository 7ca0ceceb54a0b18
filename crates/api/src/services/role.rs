//! Profile roles of a user.

use pethaven_core::error::CoreResult;
use pethaven_core::roles::{ROLE_KEEPER, ROLE_SEEKER, ROLE_VET};
use pethaven_core::types::DbId;
use pethaven_db::models::role::UserRole;
use pethaven_db::stores::{KeeperStore, SeekerStore, UserStore, VetStore};

pub struct RoleService<'a, S> {
    store: &'a S,
}

impl<'a, S: UserStore + KeeperStore + SeekerStore + VetStore> RoleService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Roles granted by the user's live profiles, in keeper, seeker, vet order.
    pub async fn roles_of(&self, user_id: DbId) -> CoreResult<Vec<UserRole>> {
        self.store.find_user(user_id).await?;

        let mut roles = Vec::with_capacity(3);
        if let Some(keeper) = self.store.find_keeper_by_user(user_id).await? {
            roles.push(UserRole {
                role: ROLE_KEEPER,
                profile_id: keeper.id,
            });
        }
        if let Some(seeker) = self.store.find_seeker_by_user(user_id).await? {
            roles.push(UserRole {
                role: ROLE_SEEKER,
                profile_id: seeker.id,
            });
        }
        if let Some(vet) = self.store.find_vet_by_user(user_id).await? {
            roles.push(UserRole {
                role: ROLE_VET,
                profile_id: vet.id,
            });
        }
        Ok(roles)
    }
}
