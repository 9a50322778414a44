//! Startup wiring from settings to an open [`Stockroom`].

use std::path::PathBuf;
use std::sync::Arc;

use camino::Utf8PathBuf;
use fixture_data::{CatalogueError, FixtureCatalogue};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use super::StockroomSettings;
use crate::domain::Stockroom;
use crate::domain::ports::{CredentialVerifier, SharedSecretVerifier, VerifierConfigError};
use crate::outbound::store::{FileStore, FileStoreError};

/// Errors returned while opening the stockroom at startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured path is not valid UTF-8.
    #[error("path '{}' is not valid UTF-8", path.display())]
    NonUtf8Path {
        /// The rejected path.
        path: PathBuf,
    },
    /// The data directory could not be opened.
    #[error(transparent)]
    Store(#[from] FileStoreError),
    /// The fixture catalogue could not be loaded.
    #[error("fixture catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),
    /// Neither a login secret nor its digest is configured.
    #[error("no login secret configured; set STOCKROOM_LOGIN_SECRET or STOCKROOM_LOGIN_SECRET_SHA256")]
    MissingSecret,
    /// The configured secret or digest is unusable.
    #[error("invalid login secret: {0}")]
    Verifier(#[from] VerifierConfigError),
    /// Stored collections could not be loaded or seeded.
    #[error("failed to open stockroom: {0}")]
    Domain(#[from] crate::domain::Error),
}

/// Build the login verifier, preferring a configured digest over a secret.
pub fn build_verifier(
    settings: &StockroomSettings,
) -> Result<Arc<dyn CredentialVerifier>, StartupError> {
    let verifier = match (&settings.login_secret_sha256, &settings.login_secret) {
        (Some(digest), _) => SharedSecretVerifier::from_hex_digest(digest)?,
        (None, Some(secret)) => SharedSecretVerifier::from_secret(secret)?,
        (None, None) => return Err(StartupError::MissingSecret),
    };
    Ok(Arc::new(verifier))
}

/// Fixture catalogue for seeding, or `None` when seeding is disabled.
pub fn load_catalogue(
    settings: &StockroomSettings,
) -> Result<Option<FixtureCatalogue>, StartupError> {
    if !settings.seed_fixtures {
        return Ok(None);
    }
    let catalogue = match &settings.fixtures_path {
        Some(path) => FixtureCatalogue::from_file(&utf8(path.clone())?)?,
        None => FixtureCatalogue::bundled()?,
    };
    Ok(Some(catalogue))
}

/// Open the file store under the configured data directory and load
/// every collection.
pub fn open_stockroom(
    settings: &StockroomSettings,
    clock: Arc<dyn Clock>,
) -> Result<Stockroom<FileStore>, StartupError> {
    let verifier = build_verifier(settings)?;
    let catalogue = load_catalogue(settings)?;
    let store = Arc::new(FileStore::open(utf8(settings.data_dir())?)?);
    info!(data_dir = %store.root(), seeded = catalogue.is_some(), "opening stockroom");
    Ok(Stockroom::open(store, clock, verifier, catalogue.as_ref())?)
}

fn utf8(path: PathBuf) -> Result<Utf8PathBuf, StartupError> {
    Utf8PathBuf::from_path_buf(path).map_err(|path| StartupError::NonUtf8Path { path })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::LoginCredentials;
    use crate::test_support::{MutableClock, ts};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    const SECRET_DIGEST: &str = "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b";

    #[fixture]
    fn settings() -> StockroomSettings {
        StockroomSettings {
            data_dir: None,
            login_secret: Some("secret".to_owned()),
            login_secret_sha256: None,
            seed_fixtures: true,
            fixtures_path: None,
        }
    }

    fn login(email: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(email, password).expect("credentials")
    }

    #[rstest]
    fn verifier_requires_a_secret(mut settings: StockroomSettings) {
        settings.login_secret = None;
        let err = build_verifier(&settings).err().expect("missing secret");
        assert!(matches!(err, StartupError::MissingSecret));
    }

    #[rstest]
    fn digest_takes_precedence_over_secret(mut settings: StockroomSettings) {
        settings.login_secret = Some("ignored".to_owned());
        settings.login_secret_sha256 = Some(SECRET_DIGEST.to_owned());
        let verifier = build_verifier(&settings).expect("valid digest");
        assert!(verifier.verify(&login("a@b.example", "secret")));
        assert!(!verifier.verify(&login("a@b.example", "ignored")));
    }

    #[rstest]
    fn malformed_digest_is_rejected(mut settings: StockroomSettings) {
        settings.login_secret_sha256 = Some("abc".to_owned());
        let err = build_verifier(&settings).err().expect("bad digest");
        assert!(matches!(err, StartupError::Verifier(VerifierConfigError::InvalidDigest { .. })));
    }

    #[rstest]
    fn seeding_can_be_disabled(mut settings: StockroomSettings) {
        settings.seed_fixtures = false;
        assert!(load_catalogue(&settings).expect("no catalogue").is_none());
    }

    #[rstest]
    fn missing_fixtures_file_is_reported(mut settings: StockroomSettings) {
        settings.fixtures_path = Some(PathBuf::from("/nonexistent/catalogue.json"));
        let err = load_catalogue(&settings).expect_err("missing file");
        assert!(matches!(err, StartupError::Catalogue(CatalogueError::IoError { .. })));
    }

    #[rstest]
    fn open_seeds_the_data_directory(mut settings: StockroomSettings) {
        let temp = TempDir::new().expect("temp dir");
        settings.data_dir = Some(temp.path().join("data"));
        let clock = Arc::new(MutableClock::new(ts("2025-06-01T09:00:00Z")));

        let stockroom = open_stockroom(&settings, clock).expect("open");
        assert!(!stockroom.products().list().is_empty());
        assert!(temp.path().join("data").join("products.json").is_file());
    }
}
