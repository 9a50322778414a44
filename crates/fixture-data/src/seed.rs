//! Seed record types.
//!
//! These types mirror the persisted layout of each collection without
//! depending on backend domain types. The backend converts them into
//! validated entities when it seeds an empty store.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Role assigned to a seeded user.
///
/// Mirrors the backend's `Role` enum without creating a dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleSeed {
    /// Full administrative access.
    Admin,
    /// Catalogue and supplier management.
    Manager,
    /// Sales recording only.
    Staff,
}

impl RoleSeed {
    /// Returns `true` for the administrator role.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// A seeded supplier record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSeed {
    /// Supplier identifier.
    pub id: String,
    /// Trading name.
    pub name: String,
    /// Primary contact at the supplier.
    pub contact_person: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Postal address.
    pub address: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A seeded product record.
///
/// # Example
///
/// ```
/// use fixture_data::ProductSeed;
///
/// let json = r#"{
///     "id": "1",
///     "name": "AMD Ryzen 5 3600",
///     "sku": "CPU-AMD-R5-3600",
///     "category": "Processor",
///     "supplier": "1",
///     "price": 12500,
///     "quantity": 15,
///     "threshold": 5,
///     "createdAt": "2025-01-15T08:30:00Z",
///     "updatedAt": "2025-05-20T10:45:00Z"
/// }"#;
/// let product: ProductSeed = serde_json::from_str(json).expect("valid product");
/// assert_eq!(product.quantity, 15);
/// assert!(product.image_url.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSeed {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Stock keeping unit code.
    pub sku: String,
    /// Category label; must be one of [`crate::KNOWN_CATEGORIES`].
    pub category: String,
    /// Identifier of the supplying supplier.
    pub supplier: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    /// Low-stock threshold.
    pub threshold: u32,
    /// Optional product image reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A seeded user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSeed {
    /// User identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Login email address.
    pub email: String,
    /// Assigned role.
    pub role: RoleSeed,
    /// Optional avatar reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Optional last login timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A seeded historical sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleSeed {
    /// Sale identifier.
    pub id: String,
    /// Identifier of the product sold.
    pub product_id: String,
    /// Units sold.
    pub quantity: u32,
    /// Unit price captured at the time of sale.
    pub price: Decimal,
    /// Quantity times unit price.
    pub total_price: Decimal,
    /// Identifier of the user who recorded the sale.
    pub sold_by: String,
    /// Time of sale.
    pub sold_at: DateTime<Utc>,
    /// Customer name.
    pub customer_name: String,
    /// Customer phone number.
    pub customer_phone: String,
    /// Customer email address.
    pub customer_email: String,
    /// Customer postal address.
    #[serde(default)]
    pub customer_address: String,
}
