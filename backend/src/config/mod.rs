//! Runtime configuration loaded via OrthoConfig.
//!
//! Settings come from `STOCKROOM_*` environment variables and the
//! configuration file. The command line belongs to the CLI, so callers
//! load with only the program name as arguments.

mod startup;

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub use self::startup::{StartupError, build_verifier, load_catalogue, open_stockroom};

const DEFAULT_DATA_DIR: &str = ".stockroom";

/// Settings controlling where state lives and how logins are checked.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOCKROOM")]
pub struct StockroomSettings {
    /// Directory holding one JSON document per collection.
    pub data_dir: Option<PathBuf>,
    /// Shared login secret; hashed on load and never stored.
    pub login_secret: Option<String>,
    /// Hex SHA-256 digest of the login secret, preferred over the secret.
    pub login_secret_sha256: Option<String>,
    /// Seed absent collections from the fixture catalogue.
    #[ortho_config(default = true)]
    pub seed_fixtures: bool,
    /// Alternative fixture catalogue to the bundled one.
    pub fixtures_path: Option<PathBuf>,
}

impl StockroomSettings {
    /// Configured data directory, falling back to `.stockroom`.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}
