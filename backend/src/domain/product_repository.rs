//! Product catalogue repository.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::ports::CollectionStore;
use super::repository::{Repository, Staged};
use super::{Category, Error, NewProduct, Product, ProductId, ProductPatch};

/// Catalogue totals shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStats {
    /// Number of products.
    pub total_products: usize,
    /// Sum of price times quantity.
    pub total_value: Decimal,
    /// Products at or below their threshold.
    pub low_stock_count: usize,
    /// Product count for every category, in category order.
    pub category_counts: BTreeMap<Category, usize>,
}

/// Products collection with catalogue queries.
pub struct ProductRepository<S> {
    inner: Repository<Product, S>,
    clock: Arc<dyn Clock>,
}

impl<S: CollectionStore> ProductRepository<S> {
    /// Load products, seeding from `seed` when the store has none.
    pub fn open<F>(store: Arc<S>, clock: Arc<dyn Clock>, seed: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Vec<Product>, Error>,
    {
        Ok(Self {
            inner: Repository::open(store, seed)?,
            clock,
        })
    }

    /// Every product in stored order.
    pub fn list(&self) -> &[Product] {
        self.inner.list()
    }

    /// Look up a product.
    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.inner.find(id)
    }

    /// Look up a product or fail with not-found.
    pub fn get(&self, id: &ProductId) -> Result<&Product, Error> {
        self.inner.get(id)
    }

    /// Create a product with a fresh id.
    pub fn add(&mut self, draft: NewProduct) -> Result<Product, Error> {
        let product = Product::create(ProductId::random(), draft, self.now())?;
        let staged = self.inner.stage_insert(product)?;
        let created = self.inner.persist(staged)?;
        info!(product_id = %created.id(), sku = created.sku(), "product added");
        Ok(created)
    }

    /// Merge `patch` into an existing product.
    pub fn update(&mut self, id: &ProductId, patch: ProductPatch) -> Result<Product, Error> {
        let now = self.now();
        let staged = self
            .inner
            .stage_update(id, |product| product.apply(patch, now))?;
        self.inner.persist(staged)
    }

    /// Delete a product. Its past sales stay in the ledger.
    pub fn remove(&mut self, id: &ProductId) -> Result<Product, Error> {
        let staged = self.inner.stage_remove(id)?;
        let removed = self.inner.persist(staged)?;
        info!(product_id = %removed.id(), "product removed");
        Ok(removed)
    }

    /// Products in `category`, in stored order.
    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.list()
            .iter()
            .filter(|product| product.category() == category)
            .collect()
    }

    /// Products at or below their threshold.
    pub fn low_stock(&self) -> Vec<&Product> {
        self.list()
            .iter()
            .filter(|product| product.is_low_stock())
            .collect()
    }

    /// Dashboard totals.
    pub fn stats(&self) -> ProductStats {
        let mut category_counts: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|category| (category, 0)).collect();
        for product in self.list() {
            *category_counts.entry(product.category()).or_insert(0) += 1;
        }
        ProductStats {
            total_products: self.list().len(),
            total_value: self
                .list()
                .iter()
                .map(Product::stock_value)
                .fold(Decimal::ZERO, Decimal::saturating_add),
            low_stock_count: self.list().iter().filter(|p| p.is_low_stock()).count(),
            category_counts,
        }
    }

    pub(crate) fn stage_stock_out(
        &self,
        id: &ProductId,
        units: u32,
        now: DateTime<Utc>,
    ) -> Result<Staged<Product>, Error> {
        self.inner
            .stage_update(id, |product| product.take_stock(units, now))
    }

    pub(crate) fn commit(&mut self, staged: Staged<Product>) -> Product {
        self.inner.commit(staged)
    }

    pub(crate) fn store(&self) -> &S {
        self.inner.store()
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }
}
