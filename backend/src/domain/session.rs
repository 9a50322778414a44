//! Login session.
//!
//! At most one user is logged in. The session is mirrored to the store as
//! a JSON user snapshot under `currentUser` plus the flag `isAuthenticated`
//! so it survives restarts.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::{CollectionStore, CredentialVerifier, StoreKey};
use super::repository::map_store_error;
use super::{Capability, Error, LoginCredentials, User, UserRepository};

const AUTHENTICATED: &str = "true";

/// Tracks the logged-in user and guards role-gated operations.
pub struct SessionService<S> {
    store: Arc<S>,
    verifier: Arc<dyn CredentialVerifier>,
    current: Option<User>,
}

impl<S: CollectionStore> SessionService<S> {
    /// Rebuild the session from the store.
    ///
    /// A session exists only when the flag reads `"true"` and the snapshot
    /// decodes; anything else starts logged out. Store read failures are
    /// returned.
    pub fn restore(store: Arc<S>, verifier: Arc<dyn CredentialVerifier>) -> Result<Self, Error> {
        let flag = store
            .load(StoreKey::IsAuthenticated)
            .map_err(map_store_error)?;
        let snapshot = store.load(StoreKey::CurrentUser).map_err(map_store_error)?;
        let current = match (flag.as_deref(), snapshot) {
            (Some(AUTHENTICATED), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(error = %err, "discarding unreadable session snapshot");
                    None
                }
            },
            _ => None,
        };
        Ok(Self {
            store,
            verifier,
            current,
        })
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    /// `true` while a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Check credentials and start a session.
    ///
    /// Both the verifier and the account lookup must succeed; either
    /// failure yields the same [`super::ErrorCode::Unauthorized`] error.
    pub fn login(
        &mut self,
        credentials: &LoginCredentials,
        users: &UserRepository<S>,
    ) -> Result<User, Error> {
        let accepted = self.verifier.verify(credentials);
        let account = users.find_by_email(credentials.email());
        let Some(user) = account.filter(|_| accepted).cloned() else {
            warn!(email = credentials.email(), "login rejected");
            return Err(Error::unauthorized("invalid email or password"));
        };

        let snapshot = serde_json::to_string(&user)
            .map_err(|err| Error::internal(format!("failed to encode session: {err}")))?;
        self.store
            .save_all(&[
                (StoreKey::CurrentUser, snapshot),
                (StoreKey::IsAuthenticated, AUTHENTICATED.to_owned()),
            ])
            .map_err(map_store_error)?;
        info!(user_id = %user.id(), role = %user.role(), "logged in");
        self.current = Some(user.clone());
        Ok(user)
    }

    /// End the session and clear both stored keys.
    ///
    /// Logging out while logged out still clears the keys.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.store
            .remove(StoreKey::CurrentUser)
            .map_err(map_store_error)?;
        self.store
            .remove(StoreKey::IsAuthenticated)
            .map_err(map_store_error)?;
        if let Some(user) = self.current.take() {
            info!(user_id = %user.id(), "logged out");
        }
        Ok(())
    }

    /// The logged-in user or [`super::ErrorCode::Unauthorized`].
    pub fn require_user(&self) -> Result<&User, Error> {
        self.current
            .as_ref()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// The logged-in user when their role grants `capability`.
    ///
    /// Fails with `Unauthorized` when logged out and `Forbidden` when the
    /// role is insufficient.
    pub fn authorize(&self, capability: Capability) -> Result<&User, Error> {
        let user = self.require_user()?;
        if !user.can(capability) {
            warn!(user_id = %user.id(), role = %user.role(), ?capability, "permission denied");
            return Err(Error::forbidden(format!(
                "role '{}' may not {}",
                user.role(),
                describe(capability)
            )));
        }
        Ok(user)
    }
}

const fn describe(capability: Capability) -> &'static str {
    match capability {
        Capability::ManageCatalogue => "manage products or suppliers",
        Capability::ManageUsers => "manage users",
        Capability::RecordSales => "record sales",
        Capability::ViewReports => "view reports",
    }
}

#[cfg(test)]
mod tests;
