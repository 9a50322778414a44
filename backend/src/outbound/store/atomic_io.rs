//! Temp-file-and-rename writes inside a capability directory.
//!
//! A write is split into two steps so several files can be staged before
//! any of them replaces its target: [`stage`] writes and syncs a hidden
//! temporary sibling, and [`StagedFile::commit`] renames it into place.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A fully written temporary file waiting to replace its target.
#[derive(Debug)]
pub(super) struct StagedFile {
    tmp_name: String,
    target: String,
}

impl StagedFile {
    /// Rename the temporary file over its target.
    pub(super) fn commit(self, dir: &Dir) -> io::Result<()> {
        if let Err(err) = rename_over(dir, &self.tmp_name, &self.target) {
            self.discard(dir);
            return Err(err);
        }
        Ok(())
    }

    /// Delete the temporary file, ignoring failures.
    pub(super) fn discard(self, dir: &Dir) {
        if dir.remove_file(&self.tmp_name).is_err() {
            // Already gone or unremovable; nothing else to do.
        }
    }
}

/// Write `contents` to a temporary sibling of `file_name` and sync it.
pub(super) fn stage(dir: &Dir, file_name: &str, contents: &str) -> io::Result<StagedFile> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{}.tmp.{}.{}.{}",
        file_name,
        std::process::id(),
        suffix,
        counter
    );

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(&tmp_name, &options)?;
    let written = file
        .write_all(contents.as_bytes())
        .and_then(|()| file.sync_all());
    drop(file);

    let staged = StagedFile {
        tmp_name,
        target: file_name.to_owned(),
    };
    match written {
        Ok(()) => Ok(staged),
        Err(err) => {
            staged.discard(dir);
            Err(err)
        }
    }
}

/// Replace `file_name` with `contents` in one rename.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    stage(dir, file_name, contents)?.commit(dir)?;
    sync_directory(dir);
    Ok(())
}

/// Flush directory metadata after renames, ignoring failures.
pub(super) fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Not every platform allows syncing a directory handle.
    }
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target)
}
