//! Outbound adapters implementing domain ports.
//!
//! - **store**: [`crate::domain::ports::CollectionStore`] backed by memory
//!   or by one JSON file per key in a data directory.
//!
//! Adapters only move strings; encoding and validation stay in the domain.

pub mod store;
