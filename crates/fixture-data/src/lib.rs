//! Seed catalogue used to populate an empty stockroom on first run.
//!
//! The crate ships a versioned JSON document holding suppliers, products,
//! users, and historical sales. It is deliberately independent of the
//! backend domain types: records are exposed as plain seed structs and the
//! backend converts them at the point of use.
//!
//! # Overview
//!
//! - [`FixtureCatalogue::bundled`] parses the catalogue embedded in the crate.
//! - [`FixtureCatalogue::from_json`] and [`FixtureCatalogue::from_file`]
//!   load alternative catalogues with the same validation rules.
//! - Validation rejects duplicate identifiers, blank required fields,
//!   unknown categories, and sales pointing at unknown products or users.
//!
//! # Example
//!
//! ```
//! use fixture_data::FixtureCatalogue;
//!
//! let catalogue = FixtureCatalogue::bundled().expect("bundled catalogue is valid");
//! assert!(!catalogue.products().is_empty());
//! assert!(catalogue.users().iter().any(|user| user.role.is_admin()));
//! ```

mod catalogue;
mod error;
mod seed;
mod validation;

pub use catalogue::FixtureCatalogue;
pub use error::CatalogueError;
pub use seed::{ProductSeed, RoleSeed, SaleSeed, SupplierSeed, UserSeed};
pub use validation::{KNOWN_CATEGORIES, is_known_category};
