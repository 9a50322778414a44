//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven adapters in [`crate::outbound`] implement these traits. Each port
//! exposes a typed error so adapters map their failures into predictable
//! variants.

mod macros;
pub(crate) use macros::define_port_error;

mod collection_store;
mod credential_verifier;

#[cfg(test)]
pub use collection_store::MockCollectionStore;
pub use collection_store::{CollectionStore, StoreError, StoreKey};
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{CredentialVerifier, SharedSecretVerifier, VerifierConfigError};
