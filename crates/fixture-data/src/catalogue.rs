//! Fixture catalogue parsing and validation.
//!
//! The catalogue is a versioned JSON document holding one array per
//! collection. Parsing validates identifiers, required text fields,
//! categories, and the references held by historical sales. Product to
//! supplier references are soft and are not checked.

use std::collections::HashSet;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::CatalogueError;
use crate::seed::{ProductSeed, SaleSeed, SupplierSeed, UserSeed};
use crate::validation::{is_blank, is_known_category};

/// Current supported catalogue version.
const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_CATALOGUE: &str = include_str!("../fixtures/catalogue.json");

/// A validated set of seed records, one list per collection.
///
/// # Example
///
/// ```
/// use fixture_data::FixtureCatalogue;
///
/// let json = r#"{
///     "version": 1,
///     "suppliers": [],
///     "products": [],
///     "users": [],
///     "sales": []
/// }"#;
///
/// let catalogue = FixtureCatalogue::from_json(json).expect("valid catalogue");
/// assert!(catalogue.products().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCatalogue {
    version: u32,
    suppliers: Vec<SupplierSeed>,
    products: Vec<ProductSeed>,
    users: Vec<UserSeed>,
    sales: Vec<SaleSeed>,
}

impl FixtureCatalogue {
    /// Parses the catalogue bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the bundled document fails validation,
    /// which the crate's own tests rule out.
    pub fn bundled() -> Result<Self, CatalogueError> {
        Self::from_json(BUNDLED_CATALOGUE)
    }

    /// Parses a catalogue from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if:
    /// - The JSON is malformed or missing required fields
    /// - The version is unsupported
    /// - Any collection repeats an identifier
    /// - A required text field is blank
    /// - A product names an unknown category
    /// - A sale is empty, mis-totalled, or references an unknown product or user
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let raw: RawCatalogue =
            serde_json::from_str(json).map_err(|e| CatalogueError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a catalogue from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, CatalogueError> {
        let io_error = |err: std::io::Error| CatalogueError::IoError {
            path: path.to_path_buf(),
            message: err.to_string(),
        };
        let parent = match path.parent() {
            Some(parent) if !parent.as_str().is_empty() => parent,
            _ => Utf8Path::new("."),
        };
        let file_name = path.file_name().ok_or_else(|| CatalogueError::IoError {
            path: path.to_path_buf(),
            message: "catalogue path must name a file".to_owned(),
        })?;

        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
        let contents = dir.read_to_string(file_name).map_err(io_error)?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawCatalogue) -> Result<Self, CatalogueError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(CatalogueError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        for supplier in &raw.suppliers {
            require_text("supplier", &supplier.id, "name", &supplier.name)?;
            require_text("supplier", &supplier.id, "email", &supplier.email)?;
        }
        unique_ids("supplier", raw.suppliers.iter().map(|s| s.id.as_str()))?;

        for product in &raw.products {
            require_text("product", &product.id, "name", &product.name)?;
            require_text("product", &product.id, "sku", &product.sku)?;
            if !is_known_category(&product.category) {
                return Err(CatalogueError::UnknownCategory {
                    product_id: product.id.clone(),
                    category: product.category.clone(),
                });
            }
        }
        let product_ids = unique_ids("product", raw.products.iter().map(|p| p.id.as_str()))?;

        for user in &raw.users {
            require_text("user", &user.id, "name", &user.name)?;
            require_text("user", &user.id, "email", &user.email)?;
        }
        let user_ids = unique_ids("user", raw.users.iter().map(|u| u.id.as_str()))?;

        for sale in &raw.sales {
            check_sale(sale, &product_ids, &user_ids)?;
        }
        unique_ids("sale", raw.sales.iter().map(|s| s.id.as_str()))?;

        Ok(Self {
            version: raw.version,
            suppliers: raw.suppliers,
            products: raw.products,
            users: raw.users,
            sales: raw.sales,
        })
    }

    /// Returns the catalogue version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the seeded suppliers.
    #[must_use]
    pub fn suppliers(&self) -> &[SupplierSeed] {
        &self.suppliers
    }

    /// Returns the seeded products.
    #[must_use]
    pub fn products(&self) -> &[ProductSeed] {
        &self.products
    }

    /// Returns the seeded users.
    #[must_use]
    pub fn users(&self) -> &[UserSeed] {
        &self.users
    }

    /// Returns the seeded historical sales.
    #[must_use]
    pub fn sales(&self) -> &[SaleSeed] {
        &self.sales
    }
}

fn require_text(
    collection: &'static str,
    id: &str,
    field: &'static str,
    value: &str,
) -> Result<(), CatalogueError> {
    if is_blank(value) {
        return Err(CatalogueError::BlankField {
            collection,
            id: id.to_owned(),
            field,
        });
    }
    Ok(())
}

fn unique_ids<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<HashSet<&'a str>, CatalogueError> {
    let mut seen = HashSet::new();
    for id in ids {
        if is_blank(id) {
            return Err(CatalogueError::BlankField {
                collection,
                id: id.to_owned(),
                field: "id",
            });
        }
        if !seen.insert(id) {
            return Err(CatalogueError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(seen)
}

fn check_sale(
    sale: &SaleSeed,
    product_ids: &HashSet<&str>,
    user_ids: &HashSet<&str>,
) -> Result<(), CatalogueError> {
    if sale.quantity == 0 {
        return Err(CatalogueError::EmptySale {
            sale_id: sale.id.clone(),
        });
    }
    if sale.price * Decimal::from(sale.quantity) != sale.total_price {
        return Err(CatalogueError::InconsistentSaleTotal {
            sale_id: sale.id.clone(),
        });
    }
    if !product_ids.contains(sale.product_id.as_str()) {
        return Err(CatalogueError::UnknownReference {
            sale_id: sale.id.clone(),
            field: "productId",
            target: sale.product_id.clone(),
        });
    }
    if !user_ids.contains(sale.sold_by.as_str()) {
        return Err(CatalogueError::UnknownReference {
            sale_id: sale.id.clone(),
            field: "soldBy",
            target: sale.sold_by.clone(),
        });
    }
    require_text("sale", &sale.id, "customerName", &sale.customer_name)
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalogue {
    version: u32,
    #[serde(default)]
    suppliers: Vec<SupplierSeed>,
    #[serde(default)]
    products: Vec<ProductSeed>,
    #[serde(default)]
    users: Vec<UserSeed>,
    #[serde(default)]
    sales: Vec<SaleSeed>,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const PRODUCT: &str = r#"{
        "id": "1", "name": "AMD Ryzen 5 3600", "sku": "CPU-AMD-R5-3600",
        "category": "Processor", "supplier": "1", "price": 12500,
        "quantity": 15, "threshold": 5,
        "createdAt": "2025-01-15T08:30:00Z", "updatedAt": "2025-05-20T10:45:00Z"
    }"#;

    const USER: &str = r#"{
        "id": "3", "name": "Robin Karim", "email": "staff1@stockroom.example",
        "role": "staff", "createdAt": "2025-01-10T11:45:00Z"
    }"#;

    fn sale(product_id: &str, sold_by: &str, quantity: u32, total: u32) -> String {
        format!(
            r#"{{
                "id": "1", "productId": "{product_id}", "quantity": {quantity},
                "price": 12500, "totalPrice": {total}, "soldBy": "{sold_by}",
                "soldAt": "2025-05-01T10:30:00Z", "customerName": "Rakib Hassan",
                "customerPhone": "+8801712345678", "customerEmail": "rakib@customer.example",
                "customerAddress": "Dhaka"
            }}"#
        )
    }

    fn catalogue_with_sale(sale: &str) -> String {
        format!(
            r#"{{"version": 1, "products": [{PRODUCT}], "users": [{USER}], "sales": [{sale}]}}"#
        )
    }

    #[test]
    fn bundled_catalogue_is_valid() {
        let catalogue = FixtureCatalogue::bundled().expect("bundled catalogue parses");

        assert_eq!(catalogue.version(), 1);
        assert!(!catalogue.suppliers().is_empty());
        assert!(!catalogue.products().is_empty());
        assert!(catalogue.users().iter().any(|user| user.role.is_admin()));
        assert!(!catalogue.sales().is_empty());
    }

    #[test]
    fn accepts_consistent_sale() {
        let json = catalogue_with_sale(&sale("1", "3", 2, 25000));
        let catalogue = FixtureCatalogue::from_json(&json).expect("valid catalogue");
        assert_eq!(catalogue.sales().len(), 1);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let catalogue =
            FixtureCatalogue::from_json(r#"{"version": 1}"#).expect("valid catalogue");
        assert!(catalogue.suppliers().is_empty());
        assert!(catalogue.sales().is_empty());
    }

    #[rstest]
    #[case::malformed_json("not valid json")]
    #[case::missing_version(r#"{"products": []}"#)]
    fn rejects_json_with_parse_error(#[case] json: &str) {
        let result = FixtureCatalogue::from_json(json);
        assert!(matches!(result, Err(CatalogueError::ParseError { .. })));
    }

    #[test]
    fn rejects_unsupported_version() {
        let result = FixtureCatalogue::from_json(r#"{"version": 99}"#);
        assert_eq!(
            result,
            Err(CatalogueError::UnsupportedVersion {
                expected: 1,
                actual: 99
            })
        );
    }

    #[test]
    fn rejects_duplicate_product_ids() {
        let json = format!(r#"{{"version": 1, "products": [{PRODUCT}, {PRODUCT}]}}"#);
        let result = FixtureCatalogue::from_json(&json);
        assert_eq!(
            result,
            Err(CatalogueError::DuplicateId {
                collection: "product",
                id: "1".to_owned()
            })
        );
    }

    #[test]
    fn rejects_unknown_category() {
        let json = format!(
            r#"{{"version": 1, "products": [{}]}}"#,
            PRODUCT.replace("Processor", "Monitor")
        );
        let result = FixtureCatalogue::from_json(&json);
        assert_eq!(
            result,
            Err(CatalogueError::UnknownCategory {
                product_id: "1".to_owned(),
                category: "Monitor".to_owned()
            })
        );
    }

    #[test]
    fn rejects_blank_user_email() {
        let json = format!(
            r#"{{"version": 1, "users": [{}]}}"#,
            USER.replace("staff1@stockroom.example", "  ")
        );
        let result = FixtureCatalogue::from_json(&json);
        assert_eq!(
            result,
            Err(CatalogueError::BlankField {
                collection: "user",
                id: "3".to_owned(),
                field: "email"
            })
        );
    }

    #[rstest]
    #[case::unknown_product(
        sale("404", "3", 1, 12500),
        CatalogueError::UnknownReference {
            sale_id: "1".to_owned(),
            field: "productId",
            target: "404".to_owned(),
        }
    )]
    #[case::unknown_seller(
        sale("1", "99", 1, 12500),
        CatalogueError::UnknownReference {
            sale_id: "1".to_owned(),
            field: "soldBy",
            target: "99".to_owned(),
        }
    )]
    #[case::empty_sale(sale("1", "3", 0, 0), CatalogueError::EmptySale { sale_id: "1".to_owned() })]
    #[case::wrong_total(
        sale("1", "3", 2, 12500),
        CatalogueError::InconsistentSaleTotal { sale_id: "1".to_owned() }
    )]
    fn rejects_invalid_sales(#[case] sale_json: String, #[case] expected: CatalogueError) {
        let result = FixtureCatalogue::from_json(&catalogue_with_sale(&sale_json));
        assert_eq!(result, Err(expected));
    }
}
