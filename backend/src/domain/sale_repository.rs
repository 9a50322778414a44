//! Sales ledger repository.
//!
//! The ledger is append-only. New entries arrive only through the sales
//! engine, which stages them together with the matching stock change.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::ports::CollectionStore;
use super::repository::{Repository, Staged};
use super::{Error, ProductId, Sale, SaleId};

/// Sales ledger.
pub struct SaleRepository<S> {
    inner: Repository<Sale, S>,
}

impl<S: CollectionStore> SaleRepository<S> {
    /// Load the ledger, seeding from `seed` when the store has none.
    pub fn open<F>(store: Arc<S>, seed: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Vec<Sale>, Error>,
    {
        Ok(Self {
            inner: Repository::open(store, seed)?,
        })
    }

    /// Every sale in recorded order.
    pub fn list(&self) -> &[Sale] {
        self.inner.list()
    }

    /// Look up a sale or fail with not-found.
    pub fn get(&self, id: &SaleId) -> Result<&Sale, Error> {
        self.inner.get(id)
    }

    /// Sales of one product, in recorded order.
    pub fn by_product(&self, product_id: &ProductId) -> Vec<&Sale> {
        self.list()
            .iter()
            .filter(|sale| sale.product_id() == product_id)
            .collect()
    }

    /// Sales with `start <= sold_at <= end`.
    pub fn by_date_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<&Sale> {
        self.list()
            .iter()
            .filter(|sale| (start..=end).contains(&sale.sold_at()))
            .collect()
    }

    pub(crate) fn stage_append(&self, sale: Sale) -> Result<Staged<Sale>, Error> {
        self.inner.stage_insert(sale)
    }

    pub(crate) fn commit(&mut self, staged: Staged<Sale>) -> Sale {
        self.inner.commit(staged)
    }

    pub(crate) fn store(&self) -> &S {
        self.inner.store()
    }
}
