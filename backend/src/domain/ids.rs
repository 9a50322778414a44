//! Typed identifiers for persisted entities.
//!
//! Identifiers are opaque strings. Seeded records use short numeric ids
//! while records created at runtime receive a random UUID, so the only
//! invariant enforced here is that the value is non-empty and carries no
//! surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Error;

/// Validation errors returned when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    /// The identifier was empty.
    Empty,
    /// The identifier had leading or trailing whitespace.
    Padded,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "identifier must not be empty"),
            Self::Padded => write!(f, "identifier must not have surrounding whitespace"),
        }
    }
}

impl std::error::Error for IdValidationError {}

impl From<IdValidationError> for Error {
    fn from(value: IdValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

fn validate_id(id: String) -> Result<String, IdValidationError> {
    if id.is_empty() {
        return Err(IdValidationError::Empty);
    }
    if id.trim() != id {
        return Err(IdValidationError::Padded);
    }
    Ok(id)
}

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                validate_id(id.as_ref().to_owned()).map(Self)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            /// Borrow the identifier text.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                validate_id(value).map(Self)
            }
        }

        impl std::str::FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

define_entity_id! {
    /// Identifier of a catalogue product.
    ProductId
}

define_entity_id! {
    /// Identifier of a supplier.
    SupplierId
}

define_entity_id! {
    /// Identifier of a user account.
    UserId
}

define_entity_id! {
    /// Identifier of a recorded sale.
    SaleId
}
