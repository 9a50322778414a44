//! Inventory, supplier and point-of-sale core.
//!
//! - [`domain`]: entities, repositories, session, sales and reports.
//! - [`outbound`]: collection store adapters.
//! - [`inbound`]: the command-line adapter.
//! - [`config`]: settings and startup wiring.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
