//! Catalogue products.
//!
//! Products are created from a validated [`NewProduct`] draft and edited
//! through a [`ProductPatch`]. The `supplier` field is a soft reference:
//! deleting a supplier leaves its products in place.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{require_price, require_optional_text, require_text};
use super::{Category, Error, ProductId, SupplierId};

/// Stock position of a product relative to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StockStatus {
    /// No units left.
    OutOfStock,
    /// At or below the low-stock threshold.
    LowStock,
    /// Above the threshold.
    InStock,
}

impl StockStatus {
    /// Report label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

/// A product held in the catalogue.
///
/// ## Invariants
/// - `name` and `sku` are non-blank.
/// - `price` is non-negative.
/// - `updated_at` is never earlier than `created_at` for records created
///   through the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    sku: String,
    category: Category,
    supplier: SupplierId,
    price: Decimal,
    quantity: u32,
    threshold: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a validated draft.
    pub(crate) fn create(id: ProductId, draft: NewProduct, now: DateTime<Utc>) -> Result<Self, Error> {
        draft.validate()?;
        let NewProduct {
            name,
            sku,
            category,
            supplier,
            price,
            quantity,
            threshold,
            image_url,
        } = draft;
        Ok(Self {
            id,
            name: name.trim().to_owned(),
            sku: sku.trim().to_owned(),
            category,
            supplier,
            price,
            quantity,
            threshold,
            image_url,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild a product from persisted or seeded parts without touching
    /// its timestamps.
    pub(crate) fn restore(
        id: ProductId,
        draft: NewProduct,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let mut product = Self::create(id, draft, created_at)?;
        product.updated_at = updated_at;
        Ok(product)
    }

    /// Merge a patch and refresh `updated_at`.
    pub(crate) fn apply(&mut self, patch: ProductPatch, now: DateTime<Utc>) -> Result<(), Error> {
        patch.validate()?;
        let ProductPatch {
            name,
            sku,
            category,
            supplier,
            price,
            quantity,
            threshold,
            image_url,
        } = patch;
        if let Some(value) = name {
            self.name = value.trim().to_owned();
        }
        if let Some(value) = sku {
            self.sku = value.trim().to_owned();
        }
        if let Some(value) = category {
            self.category = value;
        }
        if let Some(value) = supplier {
            self.supplier = value;
        }
        if let Some(value) = price {
            self.price = value;
        }
        if let Some(value) = quantity {
            self.quantity = value;
        }
        if let Some(value) = threshold {
            self.threshold = value;
        }
        if let Some(value) = image_url {
            self.image_url = value;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Remove `units` from stock.
    pub(crate) fn take_stock(&mut self, units: u32, now: DateTime<Utc>) -> Result<(), Error> {
        let remaining = self.quantity.checked_sub(units).ok_or_else(|| {
            Error::insufficient_stock(format!(
                "only {} units of '{}' in stock",
                self.quantity, self.name
            ))
        })?;
        self.quantity = remaining;
        self.updated_at = now;
        Ok(())
    }

    /// Product identifier.
    pub fn id(&self) -> &ProductId {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Stock keeping unit code.
    pub fn sku(&self) -> &str {
        self.sku.as_str()
    }

    /// Catalogue category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Supplier reference.
    pub fn supplier(&self) -> &SupplierId {
        &self.supplier
    }

    /// Current unit price.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Units in stock.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Low-stock threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Optional image reference.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification time.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// `true` when stock is at or below the threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.threshold
    }

    /// Price multiplied by units in stock, saturating at `Decimal::MAX`.
    pub fn stock_value(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// Classify stock against the threshold.
    pub fn stock_status(&self) -> StockStatus {
        if self.quantity == 0 {
            StockStatus::OutOfStock
        } else if self.is_low_stock() {
            StockStatus::LowStock
        } else {
            StockStatus::InStock
        }
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Stock keeping unit code.
    pub sku: String,
    /// Catalogue category.
    pub category: Category,
    /// Supplier reference.
    pub supplier: SupplierId,
    /// Unit price.
    pub price: Decimal,
    /// Opening stock.
    pub quantity: u32,
    /// Low-stock threshold.
    pub threshold: u32,
    /// Optional image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewProduct {
    /// Check required fields.
    pub fn validate(&self) -> Result<(), Error> {
        require_text("name", &self.name)?;
        require_text("sku", &self.sku)?;
        require_price("price", self.price)
    }
}

/// Partial update for a product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// New display name.
    pub name: Option<String>,
    /// New SKU.
    pub sku: Option<String>,
    /// New category.
    pub category: Option<Category>,
    /// New supplier reference.
    pub supplier: Option<SupplierId>,
    /// New unit price.
    pub price: Option<Decimal>,
    /// New stock level.
    pub quantity: Option<u32>,
    /// New threshold.
    pub threshold: Option<u32>,
    /// `Some(None)` clears the image.
    pub image_url: Option<Option<String>>,
}

impl ProductPatch {
    /// Check the fields the patch sets.
    pub fn validate(&self) -> Result<(), Error> {
        require_optional_text("name", self.name.as_deref())?;
        require_optional_text("sku", self.sku.as_deref())?;
        self.price
            .map_or(Ok(()), |price| require_price("price", price))
    }
}
