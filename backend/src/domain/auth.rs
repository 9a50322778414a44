//! Authentication primitives such as login credentials.
//!
//! Inbound adapters build [`LoginCredentials`] from raw strings before the
//! session service consults a credential verifier.

use std::fmt;

use zeroize::Zeroizing;

use super::Error;

/// Returned when login inputs are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

impl From<LoginValidationError> for Error {
    fn from(value: LoginValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and non-empty. It is not parsed as an address:
///   a malformed email simply matches no account.
/// - `password` is non-empty and keeps caller-provided whitespace. It is
///   wiped from memory on drop.
///
/// # Examples
/// ```
/// use stockroom::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin@stockroom.example ", "s3cret")
///     .expect("valid inputs");
/// assert_eq!(creds.email(), "admin@stockroom.example");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email and password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            email: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("admin@stockroom.example", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin@stockroom.example  ", "secret")]
    #[case("staff1@stockroom.example", " padded password ")]
    fn valid_credentials_trim_email(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email(), email.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let creds = LoginCredentials::try_from_parts("admin@stockroom.example", "hunter2")
            .expect("valid inputs");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("admin@stockroom.example"));
    }
}
