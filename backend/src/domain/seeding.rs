//! Conversion of fixture catalogue records into domain entities.
//!
//! Repositories call these when their store key is absent. Fixture ids are
//! kept verbatim so seeded sales still point at seeded products and users.

use fixture_data::{FixtureCatalogue, ProductSeed, RoleSeed, SaleSeed, SupplierSeed, UserSeed};
use thiserror::Error;

use super::{
    Category, CustomerInfo, EmailAddress, EmailValidationError, Error, IdValidationError,
    NewProduct, NewSupplier, NewUser, Product, ProductId, Role, Sale, SaleId, SaleRequest,
    Supplier, SupplierId, UnknownCategory, User, UserId,
};

/// Errors raised while converting fixture records.
#[derive(Debug, Error)]
pub enum SeedConversionError {
    /// A record id is blank or padded.
    #[error("invalid fixture id: {0}")]
    Id(#[from] IdValidationError),
    /// An email address is malformed.
    #[error("invalid fixture email: {0}")]
    Email(#[from] EmailValidationError),
    /// A category label is not recognised.
    #[error("invalid fixture category: {0}")]
    Category(#[from] UnknownCategory),
    /// A record failed entity validation.
    #[error("invalid fixture record: {0}")]
    Record(#[from] Error),
}

impl From<SeedConversionError> for Error {
    fn from(value: SeedConversionError) -> Self {
        match value {
            SeedConversionError::Record(error) => error,
            other => Self::internal(other.to_string()),
        }
    }
}

/// Convert every fixture product.
pub fn seed_products(catalogue: &FixtureCatalogue) -> Result<Vec<Product>, SeedConversionError> {
    catalogue.products().iter().map(convert_product).collect()
}

/// Convert every fixture supplier.
pub fn seed_suppliers(catalogue: &FixtureCatalogue) -> Result<Vec<Supplier>, SeedConversionError> {
    catalogue.suppliers().iter().map(convert_supplier).collect()
}

/// Convert every fixture user.
pub fn seed_users(catalogue: &FixtureCatalogue) -> Result<Vec<User>, SeedConversionError> {
    catalogue.users().iter().map(convert_user).collect()
}

/// Convert every fixture sale.
pub fn seed_sales(catalogue: &FixtureCatalogue) -> Result<Vec<Sale>, SeedConversionError> {
    catalogue.sales().iter().map(convert_sale).collect()
}

fn convert_product(seed: &ProductSeed) -> Result<Product, SeedConversionError> {
    let draft = NewProduct {
        name: seed.name.clone(),
        sku: seed.sku.clone(),
        category: seed.category.parse::<Category>()?,
        supplier: SupplierId::new(&seed.supplier)?,
        price: seed.price,
        quantity: seed.quantity,
        threshold: seed.threshold,
        image_url: seed.image_url.clone(),
    };
    Ok(Product::restore(
        ProductId::new(&seed.id)?,
        draft,
        seed.created_at,
        seed.updated_at,
    )?)
}

fn convert_supplier(seed: &SupplierSeed) -> Result<Supplier, SeedConversionError> {
    let draft = NewSupplier {
        name: seed.name.clone(),
        contact_person: seed.contact_person.clone(),
        email: EmailAddress::new(&seed.email)?,
        phone: seed.phone.clone(),
        address: seed.address.clone(),
    };
    Ok(Supplier::restore(
        SupplierId::new(&seed.id)?,
        draft,
        seed.created_at,
        seed.updated_at,
    )?)
}

fn convert_user(seed: &UserSeed) -> Result<User, SeedConversionError> {
    let draft = NewUser {
        name: seed.name.clone(),
        email: EmailAddress::new(&seed.email)?,
        role: map_role(seed.role),
        avatar: seed.avatar.clone(),
    };
    Ok(User::create(UserId::new(&seed.id)?, draft, seed.created_at)?.with_last_login(seed.last_login))
}

fn convert_sale(seed: &SaleSeed) -> Result<Sale, SeedConversionError> {
    let request = SaleRequest {
        product_id: ProductId::new(&seed.product_id)?,
        quantity: seed.quantity,
        unit_price: seed.price,
        customer: CustomerInfo {
            name: seed.customer_name.clone(),
            phone: seed.customer_phone.clone(),
            email: seed.customer_email.clone(),
            address: seed.customer_address.clone(),
        },
    };
    Ok(Sale::record(
        SaleId::new(&seed.id)?,
        request,
        UserId::new(&seed.sold_by)?,
        seed.sold_at,
    )?)
}

const fn map_role(role: RoleSeed) -> Role {
    match role {
        RoleSeed::Admin => Role::Admin,
        RoleSeed::Manager => Role::Manager,
        RoleSeed::Staff => Role::Staff,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal::Decimal;

    #[fixture]
    fn bundled() -> FixtureCatalogue {
        FixtureCatalogue::bundled().expect("bundled catalogue is valid")
    }

    #[rstest]
    fn bundled_catalogue_converts_completely(bundled: FixtureCatalogue) {
        assert_eq!(seed_products(&bundled).expect("products").len(), bundled.products().len());
        assert_eq!(seed_suppliers(&bundled).expect("suppliers").len(), bundled.suppliers().len());
        assert_eq!(seed_users(&bundled).expect("users").len(), bundled.users().len());
        assert_eq!(seed_sales(&bundled).expect("sales").len(), bundled.sales().len());
    }

    #[rstest]
    fn seeded_ids_and_timestamps_are_preserved(bundled: FixtureCatalogue) {
        let products = seed_products(&bundled).expect("products");
        let first = products.first().expect("at least one product");
        let seed = bundled.products().first().expect("at least one seed");
        assert_eq!(first.id().as_str(), seed.id);
        assert_eq!(first.created_at(), seed.created_at);
        assert_eq!(first.updated_at(), seed.updated_at);
    }

    #[rstest]
    fn seeded_sales_keep_recorded_totals(bundled: FixtureCatalogue) {
        let sales = seed_sales(&bundled).expect("sales");
        for (sale, seed) in sales.iter().zip(bundled.sales()) {
            assert_eq!(sale.total_price(), seed.total_price);
            assert_eq!(sale.total_price(), seed.price * Decimal::from(seed.quantity));
        }
    }

    #[rstest]
    fn seeded_roles_cover_all_variants(bundled: FixtureCatalogue) {
        let users = seed_users(&bundled).expect("users");
        for role in [Role::Admin, Role::Manager, Role::Staff] {
            assert!(users.iter().any(|user| user.role() == role));
        }
    }

    #[rstest]
    fn malformed_email_is_reported() {
        let json = r#"{
            "version": 1,
            "suppliers": [{
                "id": "1", "name": "Acme", "contactPerson": "Ana", "email": "not-an-email",
                "phone": "1", "address": "Dhaka",
                "createdAt": "2025-01-01T00:00:00Z", "updatedAt": "2025-01-01T00:00:00Z"
            }]
        }"#;
        let catalogue = FixtureCatalogue::from_json(json).expect("structurally valid");
        let err = seed_suppliers(&catalogue).expect_err("bad email");
        assert!(matches!(err, SeedConversionError::Email(EmailValidationError::Malformed)));
    }
}
