//! Test utilities for the stockroom crate.
//!
//! Shared builders and doubles for unit tests (in `src/`) and integration
//! tests (in `tests/`). Compiled for tests and with the `test-support`
//! feature.

use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;
use rust_decimal::Decimal;

use crate::domain::ports::{CredentialVerifier, SharedSecretVerifier};
use crate::domain::{
    Category, CustomerInfo, EmailAddress, LoginCredentials, NewProduct, NewSupplier, NewUser,
    Product, ProductId, Role, Sale, SaleId, SaleRequest, Supplier, SupplierId, User, UserId,
};

/// Password accepted by [`verifier`].
pub const TEST_SECRET: &str = "correct horse battery staple";

/// Timestamp stamped on fixture-style records.
const CREATED: &str = "2025-01-01T00:00:00Z";

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Start the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Parse an RFC 3339 timestamp.
pub fn ts(raw: &str) -> DateTime<Utc> {
    DateTime::from_str(raw).expect("valid RFC 3339 timestamp")
}

/// Parse an id, panicking on blank input.
pub fn product_id(raw: &str) -> ProductId {
    ProductId::new(raw).expect("valid product id")
}

pub fn supplier_id(raw: &str) -> SupplierId {
    SupplierId::new(raw).expect("valid supplier id")
}

pub fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

pub fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

/// Product draft supplied by supplier `1` at a price of 100.
pub fn new_product(name: &str, category: Category, quantity: u32, threshold: u32) -> NewProduct {
    NewProduct {
        name: name.to_owned(),
        sku: format!("SKU-{}", name.replace(' ', "-").to_uppercase()),
        category,
        supplier: supplier_id("1"),
        price: Decimal::from(100),
        quantity,
        threshold,
        image_url: None,
    }
}

/// Stored product named `Product {id}` priced at 100.
pub fn sample_product(id: &str, category: Category, quantity: u32, threshold: u32) -> Product {
    priced_product(id, &format!("Product {id}"), category, "1", 100, quantity, threshold)
}

/// Stored product with explicit name, supplier and price.
pub fn priced_product(
    id: &str,
    name: &str,
    category: Category,
    supplier: &str,
    price: i64,
    quantity: u32,
    threshold: u32,
) -> Product {
    let draft = NewProduct {
        name: name.to_owned(),
        sku: format!("SKU-{id}"),
        category,
        supplier: supplier_id(supplier),
        price: Decimal::from(price),
        quantity,
        threshold,
        image_url: None,
    };
    Product::restore(product_id(id), draft, ts(CREATED), ts(CREATED)).expect("valid product")
}

/// Supplier draft with fixed contact details.
pub fn new_supplier(name: &str) -> NewSupplier {
    NewSupplier {
        name: name.to_owned(),
        contact_person: "Nadia Rahman".to_owned(),
        email: email("orders@supplier.example"),
        phone: "+8801700000000".to_owned(),
        address: "Dhaka".to_owned(),
    }
}

pub fn sample_supplier(id: &str, name: &str) -> Supplier {
    Supplier::restore(supplier_id(id), new_supplier(name), ts(CREATED), ts(CREATED))
        .expect("valid supplier")
}

/// Stored user `"{Role} {id}"` with email `{role}{id}@stockroom.example`.
pub fn sample_user(id: &str, role: Role) -> User {
    let title = match role {
        Role::Admin => "Admin",
        Role::Manager => "Manager",
        Role::Staff => "Staff",
    };
    let draft = NewUser {
        name: format!("{title} {id}"),
        email: email(&format!("{role}{id}@stockroom.example")),
        role,
        avatar: None,
    };
    User::create(user_id(id), draft, ts(CREATED)).expect("valid user")
}

fn customer() -> CustomerInfo {
    CustomerInfo {
        name: "Rakib Hassan".to_owned(),
        phone: "+8801712345678".to_owned(),
        email: "rakib@customer.example".to_owned(),
        address: "Chittagong".to_owned(),
    }
}

/// Sale request for a fixed walk-in customer.
pub fn sale_request(product: &str, quantity: u32, unit_price: i64) -> SaleRequest {
    SaleRequest {
        product_id: product_id(product),
        quantity,
        unit_price: Decimal::from(unit_price),
        customer: customer(),
    }
}

/// Ledger entry at a unit price of 100, sold by user `3`.
pub fn sample_sale(id: &str, product: &str, quantity: u32, sold_at: &str) -> Sale {
    Sale::record(
        SaleId::new(id).expect("valid sale id"),
        sale_request(product, quantity, 100),
        user_id("3"),
        ts(sold_at),
    )
    .expect("valid sale")
}

/// Verifier accepting [`TEST_SECRET`] for every account.
pub fn verifier() -> Arc<dyn CredentialVerifier> {
    Arc::new(SharedSecretVerifier::from_secret(TEST_SECRET).expect("non-empty secret"))
}

/// Login credentials, panicking on blank input.
pub fn credentials(email: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(email, password).expect("non-empty credentials")
}
