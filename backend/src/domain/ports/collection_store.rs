//! Port abstraction for the key/value store that holds each collection.
//!
//! Every persisted collection lives under one well-known key as a JSON
//! document. The domain owns encoding; adapters only move strings.

use std::fmt;

use super::define_port_error;

define_port_error! {
    /// Errors raised by collection store adapters.
    pub enum StoreError {
        /// Reading a key failed.
        Read { key: String, message: String } =>
            "failed to read '{key}' from store: {message}",
        /// Writing a key failed.
        Write { key: String, message: String } =>
            "failed to write '{key}' to store: {message}",
        /// Removing a key failed.
        Remove { key: String, message: String } =>
            "failed to remove '{key}' from store: {message}",
    }
}

/// Well-known keys under which collections and the session are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    /// Product catalogue.
    Products,
    /// Supplier contacts.
    Suppliers,
    /// User accounts.
    Users,
    /// Sales ledger.
    Sales,
    /// Snapshot of the logged-in user.
    CurrentUser,
    /// Session flag.
    IsAuthenticated,
}

impl StoreKey {
    /// Every persisted key.
    pub const ALL: [Self; 6] = [
        Self::Products,
        Self::Suppliers,
        Self::Users,
        Self::Sales,
        Self::CurrentUser,
        Self::IsAuthenticated,
    ];

    /// Persisted key name.
    ///
    /// # Examples
    /// ```
    /// use stockroom::domain::ports::StoreKey;
    ///
    /// assert_eq!(StoreKey::Sales.as_str(), "soldProducts");
    /// ```
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Suppliers => "suppliers",
            Self::Users => "users",
            Self::Sales => "soldProducts",
            Self::CurrentUser => "currentUser",
            Self::IsAuthenticated => "isAuthenticated",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string storage keyed by [`StoreKey`].
#[cfg_attr(test, mockall::automock)]
pub trait CollectionStore: Send + Sync {
    /// Fetch the raw document stored under `key`, or `None` when absent.
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    fn save(&self, key: StoreKey, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: StoreKey) -> Result<(), StoreError>;

    /// Replace several documents together.
    ///
    /// The default writes each entry in turn and stops at the first
    /// failure. Adapters that can stage writes override it so either every
    /// entry lands or none does.
    fn save_all(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.save(*key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use std::collections::HashSet;

    use rstest::rstest;

    #[rstest]
    fn key_names_are_unique() {
        let names: HashSet<&str> = StoreKey::ALL.iter().map(|key| key.as_str()).collect();
        assert_eq!(names.len(), StoreKey::ALL.len());
    }

    #[rstest]
    #[case(StoreKey::Products, "products")]
    #[case(StoreKey::Sales, "soldProducts")]
    #[case(StoreKey::CurrentUser, "currentUser")]
    #[case(StoreKey::IsAuthenticated, "isAuthenticated")]
    fn keys_use_persisted_names(#[case] key: StoreKey, #[case] expected: &str) {
        assert_eq!(key.to_string(), expected);
    }

    #[rstest]
    fn store_error_messages_name_the_key() {
        let err = StoreError::write("products", "disk full");
        assert_eq!(
            err.to_string(),
            "failed to write 'products' to store: disk full"
        );
    }
}
