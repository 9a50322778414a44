//! Collection store adapters.

mod atomic_io;
mod file;
mod memory;

pub use self::file::{FileStore, FileStoreError};
pub use self::memory::MemoryStore;
