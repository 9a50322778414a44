//! Directory-backed store: one `<key>.json` file per key.

use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use thiserror::Error;
use tracing::debug;

use super::atomic_io::{self, StagedFile};
use crate::domain::ports::{CollectionStore, StoreError, StoreKey};

/// Failure to prepare the data directory.
#[derive(Debug, Error)]
#[error("failed to open data directory '{path}': {source}")]
pub struct FileStoreError {
    path: Utf8PathBuf,
    #[source]
    source: io::Error,
}

impl FileStoreError {
    /// Directory that could not be opened.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Persists each document as `<key>.json` inside a data directory.
///
/// Writes go through a temporary file and a rename, so a crash never
/// leaves a truncated document. [`CollectionStore::save_all`] stages every
/// file before renaming any of them.
#[derive(Debug)]
pub struct FileStore {
    dir: Dir,
    root: Utf8PathBuf,
}

impl FileStore {
    /// Open `root`, creating it when missing.
    pub fn open(root: impl AsRef<Utf8Path>) -> Result<Self, FileStoreError> {
        let root = root.as_ref().to_path_buf();
        let opened = Dir::create_ambient_dir_all(&root, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(&root, ambient_authority()));
        match opened {
            Ok(dir) => {
                debug!(path = %root, "opened file store");
                Ok(Self { dir, root })
            }
            Err(source) => Err(FileStoreError { path: root, source }),
        }
    }

    /// Directory holding the documents.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn file_name(key: StoreKey) -> String {
        format!("{}.json", key.as_str())
    }
}

impl CollectionStore for FileStore {
    fn load(&self, key: StoreKey) -> Result<Option<String>, StoreError> {
        match self.dir.read_to_string(Self::file_name(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::read(key.as_str(), err.to_string())),
        }
    }

    fn save(&self, key: StoreKey, value: &str) -> Result<(), StoreError> {
        atomic_io::write_atomic(&self.dir, &Self::file_name(key), value)
            .map_err(|err| StoreError::write(key.as_str(), err.to_string()))
    }

    fn remove(&self, key: StoreKey) -> Result<(), StoreError> {
        match self.dir.remove_file(Self::file_name(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::remove(key.as_str(), err.to_string())),
        }
    }

    fn save_all(&self, entries: &[(StoreKey, String)]) -> Result<(), StoreError> {
        let mut staged: Vec<(StoreKey, StagedFile)> = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            match atomic_io::stage(&self.dir, &Self::file_name(*key), value) {
                Ok(file) => staged.push((*key, file)),
                Err(err) => {
                    for (_, file) in staged {
                        file.discard(&self.dir);
                    }
                    return Err(StoreError::write(key.as_str(), err.to_string()));
                }
            }
        }

        let mut pending = staged.into_iter();
        while let Some((key, file)) = pending.next() {
            if let Err(err) = file.commit(&self.dir) {
                for (_, rest) in pending {
                    rest.discard(&self.dir);
                }
                return Err(StoreError::write(key.as_str(), err.to_string()));
            }
        }
        atomic_io::sync_directory(&self.dir);
        Ok(())
    }
}
