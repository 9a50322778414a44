//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_optional_text, require_text};
use super::{Capability, EmailAddress, Error, Role, UserId};

/// A staff account able to log in.
///
/// ## Invariants
/// - `name` is non-blank.
/// - `email` is unique across the user collection (enforced by the
///   repository).
///
/// Users carry no `updatedAt`; edits leave `created_at` untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl User {
    pub(crate) fn create(id: UserId, draft: NewUser, now: DateTime<Utc>) -> Result<Self, Error> {
        draft.validate()?;
        let NewUser {
            name,
            email,
            role,
            avatar,
        } = draft;
        Ok(Self {
            id,
            name: name.trim().to_owned(),
            email,
            role,
            avatar,
            last_login: None,
            created_at: now,
        })
    }

    pub(crate) fn with_last_login(mut self, last_login: Option<DateTime<Utc>>) -> Self {
        self.last_login = last_login;
        self
    }

    pub(crate) fn apply(&mut self, patch: UserPatch) -> Result<(), Error> {
        patch.validate()?;
        let UserPatch {
            name,
            email,
            role,
            avatar,
        } = patch;
        if let Some(value) = name {
            self.name = value.trim().to_owned();
        }
        if let Some(value) = email {
            self.email = value;
        }
        if let Some(value) = role {
            self.role = value;
        }
        if let Some(value) = avatar {
            self.avatar = value;
        }
        Ok(())
    }

    /// User identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Full name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Assigned role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Optional avatar reference.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    /// Time of the most recent seeded or recorded login.
    pub fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Shorthand for `self.role().permits(capability)`.
    pub fn can(&self, capability: Capability) -> bool {
        self.role.permits(capability)
    }
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Full name.
    pub name: String,
    /// Login email.
    pub email: EmailAddress,
    /// Assigned role.
    pub role: Role,
    /// Optional avatar reference.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl NewUser {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), Error> {
        require_text("name", &self.name)
    }
}

/// Partial update for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New full name.
    pub name: Option<String>,
    /// New login email.
    pub email: Option<EmailAddress>,
    /// New role.
    pub role: Option<Role>,
    /// `Some(None)` clears the avatar.
    pub avatar: Option<Option<String>>,
}

impl UserPatch {
    /// Check the fields the patch sets.
    pub fn validate(&self) -> Result<(), Error> {
        require_optional_text("name", self.name.as_deref())
    }
}
