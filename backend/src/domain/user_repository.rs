//! User account repository.
//!
//! Emails identify accounts at login, so they are kept unique
//! (case-insensitively) across the collection.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::CollectionStore;
use super::repository::Repository;
use super::{EmailAddress, Error, NewUser, User, UserId, UserPatch};

/// User collection.
pub struct UserRepository<S> {
    inner: Repository<User, S>,
    clock: Arc<dyn Clock>,
}

impl<S: CollectionStore> UserRepository<S> {
    /// Load users, seeding from `seed` when the store has none.
    pub fn open<F>(store: Arc<S>, clock: Arc<dyn Clock>, seed: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Vec<User>, Error>,
    {
        Ok(Self {
            inner: Repository::open(store, seed)?,
            clock,
        })
    }

    /// Every user in stored order.
    pub fn list(&self) -> &[User] {
        self.inner.list()
    }

    /// Look up a user.
    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.inner.find(id)
    }

    /// Look up a user or fail with not-found.
    pub fn get(&self, id: &UserId) -> Result<&User, Error> {
        self.inner.get(id)
    }

    /// Find the account whose email matches `email`, ignoring case.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.list().iter().find(|user| user.email().matches(email))
    }

    /// Create a user with a fresh id.
    pub fn add(&mut self, draft: NewUser) -> Result<User, Error> {
        self.ensure_email_free(&draft.email, None)?;
        let user = User::create(UserId::random(), draft, self.clock.utc())?;
        let staged = self.inner.stage_insert(user)?;
        let created = self.inner.persist(staged)?;
        info!(user_id = %created.id(), role = %created.role(), "user added");
        Ok(created)
    }

    /// Merge `patch` into an existing user.
    pub fn update(&mut self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        if let Some(email) = patch.email.as_ref() {
            self.ensure_email_free(email, Some(id))?;
        }
        let staged = self.inner.stage_update(id, |user| user.apply(patch))?;
        self.inner.persist(staged)
    }

    /// Delete a user. Sales they recorded keep their `soldBy` reference.
    pub fn remove(&mut self, id: &UserId) -> Result<User, Error> {
        let staged = self.inner.stage_remove(id)?;
        let removed = self.inner.persist(staged)?;
        info!(user_id = %removed.id(), "user removed");
        Ok(removed)
    }

    fn ensure_email_free(&self, email: &EmailAddress, owner: Option<&UserId>) -> Result<(), Error> {
        match self.find_by_email(email.as_str()) {
            Some(existing) if Some(existing.id()) != owner => Err(Error::invalid_request(format!(
                "email '{email}' is already in use"
            ))
            .with_details(json!({ "field": "email" }))),
            _ => Ok(()),
        }
    }
}
