//! Admin-only user management.
//!
//! Every operation checks the session before the repository is touched.
//! An admin may not demote or delete their own account, which keeps at
//! least the acting admin able to manage users.

use tracing::warn;

use super::ports::CollectionStore;
use super::{Capability, Error, NewUser, Role, SessionService, User, UserId, UserPatch, UserRepository};

/// Create a user account.
pub fn add_user<S: CollectionStore>(
    session: &SessionService<S>,
    users: &mut UserRepository<S>,
    draft: NewUser,
) -> Result<User, Error> {
    session.authorize(Capability::ManageUsers)?;
    users.add(draft)
}

/// Edit a user account.
pub fn update_user<S: CollectionStore>(
    session: &SessionService<S>,
    users: &mut UserRepository<S>,
    id: &UserId,
    patch: UserPatch,
) -> Result<User, Error> {
    let actor = session.authorize(Capability::ManageUsers)?;
    let demotes_self = actor.id() == id && patch.role.is_some_and(|role| role != Role::Admin);
    if demotes_self {
        warn!(user_id = %id, "self-demotion refused");
        return Err(Error::forbidden("you cannot change your own admin role"));
    }
    users.update(id, patch)
}

/// Delete a user account.
pub fn delete_user<S: CollectionStore>(
    session: &SessionService<S>,
    users: &mut UserRepository<S>,
    id: &UserId,
) -> Result<User, Error> {
    let actor = session.authorize(Capability::ManageUsers)?;
    if actor.id() == id {
        warn!(user_id = %id, "self-deletion refused");
        return Err(Error::forbidden("you cannot delete your own account"));
    }
    users.remove(id)
}
