//! Port for checking a login password.
//!
//! The session service resolves the account by email and asks a verifier
//! whether the password is acceptable. [`SharedSecretVerifier`] accepts a
//! single configured secret for every account and stores only its SHA-256
//! digest.

use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::LoginCredentials;

/// Decides whether credentials are acceptable.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Return `true` when the password is valid for `credentials.email()`.
    fn verify(&self, credentials: &LoginCredentials) -> bool;
}

/// Raised when a verifier cannot be built from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifierConfigError {
    /// The configured secret was empty.
    #[error("login secret must not be empty")]
    EmptySecret,
    /// The configured digest is not 64 hex characters.
    #[error("login secret digest must be 64 hex characters: {message}")]
    InvalidDigest {
        /// Decoder message.
        message: String,
    },
}

/// Verifier that accepts one shared secret for all accounts.
///
/// # Examples
/// ```
/// use stockroom::domain::LoginCredentials;
/// use stockroom::domain::ports::{CredentialVerifier, SharedSecretVerifier};
///
/// let verifier = SharedSecretVerifier::from_secret("open sesame").expect("secret");
/// let ok = LoginCredentials::try_from_parts("admin@stockroom.example", "open sesame")
///     .expect("credentials");
/// let bad = LoginCredentials::try_from_parts("admin@stockroom.example", "nope")
///     .expect("credentials");
/// assert!(verifier.verify(&ok));
/// assert!(!verifier.verify(&bad));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct SharedSecretVerifier {
    digest: [u8; 32],
}

impl SharedSecretVerifier {
    /// Hash `secret` and keep only the digest.
    pub fn from_secret(secret: &str) -> Result<Self, VerifierConfigError> {
        if secret.is_empty() {
            return Err(VerifierConfigError::EmptySecret);
        }
        Ok(Self {
            digest: digest(secret),
        })
    }

    /// Use a precomputed lowercase or uppercase hex SHA-256 digest.
    pub fn from_hex_digest(hex_digest: &str) -> Result<Self, VerifierConfigError> {
        let mut digest = [0_u8; 32];
        hex::decode_to_slice(hex_digest.trim(), &mut digest).map_err(|err| {
            VerifierConfigError::InvalidDigest {
                message: err.to_string(),
            }
        })?;
        Ok(Self { digest })
    }

    /// Hex form of the stored digest.
    pub fn hex_digest(&self) -> String {
        hex::encode(self.digest)
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier").finish_non_exhaustive()
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    fn verify(&self, credentials: &LoginCredentials) -> bool {
        let candidate = digest(credentials.password());
        // Compare every byte so timing does not reveal the matching prefix.
        candidate
            .iter()
            .zip(self.digest.iter())
            .fold(0_u8, |acc, (left, right)| acc | (left ^ right))
            == 0
    }
}

fn digest(secret: &str) -> [u8; 32] {
    let bytes = Zeroizing::new(secret.as_bytes().to_vec());
    Sha256::digest(bytes.as_slice()).into()
}
