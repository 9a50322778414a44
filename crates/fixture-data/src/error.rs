//! Error types for the fixture-data crate.
//!
//! Catalogue loading fails with a single semantic enum built with
//! `thiserror`, covering I/O, JSON parsing, and the referential checks run
//! over the parsed records.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating a fixture catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// The catalogue file could not be read.
    #[error("failed to read catalogue file at '{path}': {message}")]
    IoError {
        /// Path to the catalogue file.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The catalogue JSON is malformed or missing required fields.
    #[error("invalid catalogue JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The catalogue version is not supported.
    #[error("unsupported catalogue version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the catalogue.
        actual: u32,
    },

    /// Two records in the same collection share an identifier.
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId {
        /// Collection containing the duplicate.
        collection: &'static str,
        /// The repeated identifier.
        id: String,
    },

    /// A required text field is empty once trimmed.
    #[error("{collection} '{id}' has a blank {field}")]
    BlankField {
        /// Collection containing the record.
        collection: &'static str,
        /// Identifier of the offending record.
        id: String,
        /// Name of the blank field.
        field: &'static str,
    },

    /// A product names a category outside the fixed category list.
    #[error("product '{product_id}' has unknown category '{category}'")]
    UnknownCategory {
        /// Identifier of the offending product.
        product_id: String,
        /// The unrecognised category label.
        category: String,
    },

    /// A sale points at a product or user that is not in the catalogue.
    #[error("sale '{sale_id}' references unknown {field} '{target}'")]
    UnknownReference {
        /// Identifier of the offending sale.
        sale_id: String,
        /// Name of the reference field.
        field: &'static str,
        /// The identifier that did not resolve.
        target: String,
    },

    /// A sale records zero units.
    #[error("sale '{sale_id}' must record at least one unit")]
    EmptySale {
        /// Identifier of the offending sale.
        sale_id: String,
    },

    /// A sale total does not equal quantity times unit price.
    #[error("sale '{sale_id}' total does not match quantity times unit price")]
    InconsistentSaleTotal {
        /// Identifier of the offending sale.
        sale_id: String,
    },
}
