//! Email address newtype used for user and supplier contacts.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Error;

/// Validation errors returned by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailValidationError {
    /// The address was blank.
    Empty,
    /// The address is not of the form `local@domain.tld`.
    Malformed,
}

impl fmt::Display for EmailValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "email must not be empty"),
            Self::Malformed => write!(f, "email must look like name@example.com"),
        }
    }
}

impl std::error::Error for EmailValidationError {}

impl From<EmailValidationError> for Error {
    fn from(value: EmailValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// A trimmed email address with a single `@` and a dotted domain.
///
/// Comparison is exact; callers that need case-insensitive matching use
/// [`EmailAddress::matches`].
///
/// # Examples
/// ```
/// use stockroom::domain::EmailAddress;
///
/// let email = EmailAddress::new("  admin@stockroom.example ").expect("valid email");
/// assert_eq!(email.as_str(), "admin@stockroom.example");
/// assert!(email.matches("ADMIN@stockroom.example"));
/// assert!(EmailAddress::new("admin").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(EmailValidationError::Malformed);
        }
        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(EmailValidationError::Malformed);
        };
        let domain_ok = domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !domain.contains('@');
        if local.is_empty() || !domain_ok {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Case-insensitive comparison against raw input, ignoring padding.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate.trim())
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
