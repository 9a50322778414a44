//! Application facade.
//!
//! `Stockroom` opens every repository over one shared store, restores the
//! session, and exposes the use cases the CLI drives. Guarded operations
//! delegate to the admin, sales and report modules.

use std::sync::Arc;

use fixture_data::FixtureCatalogue;
use mockable::Clock;

use super::ports::{CollectionStore, CredentialVerifier};
use super::seeding::{SeedConversionError, seed_products, seed_sales, seed_suppliers, seed_users};
use super::{
    Capability, CategoryReportRow, Error, InventoryFilter, InventoryReportRow, LoginCredentials,
    LowStockReportRow, NewProduct, NewSupplier, NewUser, Product, ProductId, ProductPatch,
    ProductRepository, ProductStats, Sale, SaleRepository, SaleRequest, SalesStats,
    SessionService, Supplier, SupplierId, SupplierPatch, SupplierReportRow, SupplierRepository,
    TopSeller, User, UserId, UserPatch, UserRepository, catalogue_admin, reports, sales,
    user_admin,
};

/// Inventory and point-of-sale state over one [`CollectionStore`].
pub struct Stockroom<S> {
    products: ProductRepository<S>,
    suppliers: SupplierRepository<S>,
    users: UserRepository<S>,
    sales: SaleRepository<S>,
    session: SessionService<S>,
}

impl<S: CollectionStore> Stockroom<S> {
    /// Open all collections and restore any persisted session.
    ///
    /// Absent collections are seeded from `seed`, or start empty when no
    /// catalogue is given.
    pub fn open(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn CredentialVerifier>,
        seed: Option<&FixtureCatalogue>,
    ) -> Result<Self, Error> {
        let suppliers = SupplierRepository::open(store.clone(), clock.clone(), || {
            seed_or_empty(seed, seed_suppliers)
        })?;
        let products = ProductRepository::open(store.clone(), clock.clone(), || {
            seed_or_empty(seed, seed_products)
        })?;
        let users = UserRepository::open(store.clone(), clock, || seed_or_empty(seed, seed_users))?;
        let sales = SaleRepository::open(store.clone(), || seed_or_empty(seed, seed_sales))?;
        let session = SessionService::restore(store, verifier)?;
        Ok(Self {
            products,
            suppliers,
            users,
            sales,
            session,
        })
    }

    /// Product catalogue.
    pub fn products(&self) -> &ProductRepository<S> {
        &self.products
    }

    /// Supplier records.
    pub fn suppliers(&self) -> &SupplierRepository<S> {
        &self.suppliers
    }

    /// User accounts.
    pub fn users(&self) -> &UserRepository<S> {
        &self.users
    }

    /// Sales ledger.
    pub fn sales(&self) -> &SaleRepository<S> {
        &self.sales
    }

    /// The login session.
    pub fn session(&self) -> &SessionService<S> {
        &self.session
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Start a session.
    pub fn login(&mut self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.session.login(credentials, &self.users)
    }

    /// End the session.
    pub fn logout(&mut self) -> Result<(), Error> {
        self.session.logout()
    }

    /// Add a product. Requires catalogue management rights.
    pub fn add_product(&mut self, draft: NewProduct) -> Result<Product, Error> {
        catalogue_admin::add_product(&self.session, &mut self.products, draft)
    }

    /// Edit a product. Requires catalogue management rights.
    pub fn update_product(&mut self, id: &ProductId, patch: ProductPatch) -> Result<Product, Error> {
        catalogue_admin::update_product(&self.session, &mut self.products, id, patch)
    }

    /// Delete a product; its sales stay in the ledger.
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Product, Error> {
        catalogue_admin::delete_product(&self.session, &mut self.products, id)
    }

    /// Add a supplier. Requires catalogue management rights.
    pub fn add_supplier(&mut self, draft: NewSupplier) -> Result<Supplier, Error> {
        catalogue_admin::add_supplier(&self.session, &mut self.suppliers, draft)
    }

    /// Edit a supplier. Requires catalogue management rights.
    pub fn update_supplier(
        &mut self,
        id: &SupplierId,
        patch: SupplierPatch,
    ) -> Result<Supplier, Error> {
        catalogue_admin::update_supplier(&self.session, &mut self.suppliers, id, patch)
    }

    /// Delete a supplier; products keep their reference.
    pub fn delete_supplier(&mut self, id: &SupplierId) -> Result<Supplier, Error> {
        catalogue_admin::delete_supplier(&self.session, &mut self.suppliers, id)
    }

    /// Create an account. Admin only.
    pub fn add_user(&mut self, draft: NewUser) -> Result<User, Error> {
        user_admin::add_user(&self.session, &mut self.users, draft)
    }

    /// Edit an account. Admins cannot demote themselves.
    pub fn update_user(&mut self, id: &UserId, patch: UserPatch) -> Result<User, Error> {
        user_admin::update_user(&self.session, &mut self.users, id, patch)
    }

    /// Delete an account other than the caller's.
    pub fn delete_user(&mut self, id: &UserId) -> Result<User, Error> {
        user_admin::delete_user(&self.session, &mut self.users, id)
    }

    /// Sell stock to a customer.
    pub fn record_sale(&mut self, request: SaleRequest) -> Result<Sale, Error> {
        sales::record_sale(&self.session, &mut self.products, &mut self.sales, request)
    }

    /// Catalogue dashboard totals.
    pub fn product_stats(&self) -> Result<ProductStats, Error> {
        self.session.require_user()?;
        Ok(self.products.stats())
    }

    /// Ledger totals and the monthly rollup.
    pub fn sales_stats(&self) -> Result<SalesStats, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::sales_stats(self.sales.list()))
    }

    /// Best sellers by units sold, at most `limit` rows.
    pub fn top_selling_products(&self, limit: usize) -> Result<Vec<TopSeller>, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::top_selling_products(
            self.sales.list(),
            self.products.list(),
            limit,
        ))
    }

    /// Per-category valuation.
    pub fn category_report(&self) -> Result<Vec<CategoryReportRow>, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::category_report(self.products.list()))
    }

    /// Per-supplier product counts and valuation.
    pub fn supplier_report(&self) -> Result<Vec<SupplierReportRow>, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::supplier_report(
            self.suppliers.list(),
            self.products.list(),
        ))
    }

    /// Stock listing narrowed by `filter`.
    pub fn inventory_report(&self, filter: InventoryFilter) -> Result<Vec<InventoryReportRow>, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::inventory_report(
            self.products.list(),
            self.suppliers.list(),
            filter,
        ))
    }

    /// Products due for reorder.
    pub fn low_stock_report(&self) -> Result<Vec<LowStockReportRow>, Error> {
        self.session.authorize(Capability::ViewReports)?;
        Ok(reports::low_stock_report(
            self.products.list(),
            self.suppliers.list(),
        ))
    }
}

fn seed_or_empty<T>(
    catalogue: Option<&FixtureCatalogue>,
    convert: fn(&FixtureCatalogue) -> Result<Vec<T>, SeedConversionError>,
) -> Result<Vec<T>, Error> {
    catalogue.map_or_else(|| Ok(Vec::new()), |catalogue| convert(catalogue).map_err(Error::from))
}
