//! Sales ledger entries and the request that produces them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::validation::{require_price, require_text};
use super::{Error, ProductId, SaleId, UserId};

/// Customer contact captured with a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer name.
    #[serde(rename = "customerName")]
    pub name: String,
    /// Customer phone.
    #[serde(rename = "customerPhone")]
    pub phone: String,
    /// Customer email.
    #[serde(rename = "customerEmail")]
    pub email: String,
    /// Customer address; may be empty.
    #[serde(rename = "customerAddress", default)]
    pub address: String,
}

impl CustomerInfo {
    /// Name, phone, and email are required; the address is optional.
    pub fn validate(&self) -> Result<(), Error> {
        require_text("customerName", &self.name)?;
        require_text("customerPhone", &self.phone)?;
        require_text("customerEmail", &self.email)
    }
}

/// An immutable record of units sold.
///
/// ## Invariants
/// - `quantity >= 1`.
/// - `total_price == quantity * price`.
/// - `price` is the unit price captured at sale time and does not follow
///   later catalogue price changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    product_id: ProductId,
    quantity: u32,
    price: Decimal,
    total_price: Decimal,
    sold_by: UserId,
    sold_at: DateTime<Utc>,
    #[serde(flatten)]
    customer: CustomerInfo,
}

impl Sale {
    /// Build a ledger entry from a validated request.
    pub(crate) fn record(
        id: SaleId,
        request: SaleRequest,
        sold_by: UserId,
        sold_at: DateTime<Utc>,
    ) -> Result<Self, Error> {
        request.validate()?;
        let SaleRequest {
            product_id,
            quantity,
            unit_price,
            customer,
        } = request;
        Ok(Self {
            id,
            product_id,
            quantity,
            price: unit_price,
            total_price: unit_price.saturating_mul(Decimal::from(quantity)),
            sold_by,
            sold_at,
            customer,
        })
    }

    /// Sale identifier.
    pub fn id(&self) -> &SaleId {
        &self.id
    }

    /// Product sold.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Units sold.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at sale time.
    pub fn price(&self) -> Decimal {
        self.price
    }

    /// `quantity * price`.
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Recording user.
    pub fn sold_by(&self) -> &UserId {
        &self.sold_by
    }

    /// Time of sale.
    pub fn sold_at(&self) -> DateTime<Utc> {
        self.sold_at
    }

    /// Customer contact.
    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }
}

/// Input to the sales engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    /// Product to sell.
    pub product_id: ProductId,
    /// Units to sell; at least one.
    pub quantity: u32,
    /// Agreed unit price.
    pub unit_price: Decimal,
    /// Customer contact.
    #[serde(flatten)]
    pub customer: CustomerInfo,
}

impl SaleRequest {
    /// Check quantity, price, and customer fields.
    pub fn validate(&self) -> Result<(), Error> {
        if self.quantity == 0 {
            return Err(Error::invalid_request("quantity must be at least 1")
                .with_details(json!({ "field": "quantity" })));
        }
        require_price("unitPrice", self.unit_price)?;
        self.customer.validate()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    fn sold_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 10, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    #[fixture]
    fn request() -> SaleRequest {
        SaleRequest {
            product_id: ProductId::new("1").expect("valid id"),
            quantity: 2,
            unit_price: Decimal::from(12500),
            customer: CustomerInfo {
                name: "Rakib Hassan".to_owned(),
                phone: "+8801712345678".to_owned(),
                email: "rakib@customer.example".to_owned(),
                address: String::new(),
            },
        }
    }

    #[rstest]
    fn record_computes_total(request: SaleRequest) {
        let sale = Sale::record(
            SaleId::new("1").expect("valid id"),
            request,
            UserId::new("3").expect("valid id"),
            sold_at(),
        )
        .expect("valid request");
        assert_eq!(sale.total_price(), Decimal::from(25000));
        assert_eq!(sale.price(), Decimal::from(12500));
    }

    #[rstest]
    #[case::zero_quantity(|r: &mut SaleRequest| r.quantity = 0)]
    #[case::negative_price(|r: &mut SaleRequest| r.unit_price = Decimal::new(-5, 1))]
    #[case::unbounded_price(|r: &mut SaleRequest| r.unit_price = Decimal::MAX)]
    #[case::blank_customer(|r: &mut SaleRequest| r.customer.name = " ".to_owned())]
    #[case::blank_phone(|r: &mut SaleRequest| r.customer.phone = String::new())]
    #[case::blank_email(|r: &mut SaleRequest| r.customer.email = String::new())]
    fn validate_rejects_bad_requests(mut request: SaleRequest, #[case] corrupt: fn(&mut SaleRequest)) {
        corrupt(&mut request);
        let err = request.validate().expect_err("invalid request");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn serialises_flat_customer_fields(request: SaleRequest) {
        let sale = Sale::record(SaleId::random(), request, UserId::new("3").expect("valid id"), sold_at())
            .expect("valid request");
        let value = serde_json::to_value(&sale).expect("serialise sale");
        assert_eq!(value["customerName"], "Rakib Hassan");
        assert_eq!(value["soldBy"], "3");
        assert_eq!(value["soldAt"], "2025-05-01T10:30:00Z");
        assert!(value.get("customer").is_none());
    }
}
