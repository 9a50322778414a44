//! Supplier repository.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::CollectionStore;
use super::repository::Repository;
use super::{Error, NewSupplier, Supplier, SupplierId, SupplierOption, SupplierPatch};

/// Supplier collection.
pub struct SupplierRepository<S> {
    inner: Repository<Supplier, S>,
    clock: Arc<dyn Clock>,
}

impl<S: CollectionStore> SupplierRepository<S> {
    /// Load suppliers, seeding from `seed` when the store has none.
    pub fn open<F>(store: Arc<S>, clock: Arc<dyn Clock>, seed: F) -> Result<Self, Error>
    where
        F: FnOnce() -> Result<Vec<Supplier>, Error>,
    {
        Ok(Self {
            inner: Repository::open(store, seed)?,
            clock,
        })
    }

    /// Every supplier in stored order.
    pub fn list(&self) -> &[Supplier] {
        self.inner.list()
    }

    /// Look up a supplier.
    pub fn find(&self, id: &SupplierId) -> Option<&Supplier> {
        self.inner.find(id)
    }

    /// Look up a supplier or fail with not-found.
    pub fn get(&self, id: &SupplierId) -> Result<&Supplier, Error> {
        self.inner.get(id)
    }

    /// Create a supplier with a fresh id.
    pub fn add(&mut self, draft: NewSupplier) -> Result<Supplier, Error> {
        let supplier = Supplier::create(SupplierId::random(), draft, self.clock.utc())?;
        let staged = self.inner.stage_insert(supplier)?;
        let created = self.inner.persist(staged)?;
        info!(supplier_id = %created.id(), "supplier added");
        Ok(created)
    }

    /// Merge `patch` into an existing supplier.
    pub fn update(&mut self, id: &SupplierId, patch: SupplierPatch) -> Result<Supplier, Error> {
        let now = self.clock.utc();
        let staged = self
            .inner
            .stage_update(id, |supplier| supplier.apply(patch, now))?;
        self.inner.persist(staged)
    }

    /// Delete a supplier. Products that reference it are left as they are.
    pub fn remove(&mut self, id: &SupplierId) -> Result<Supplier, Error> {
        let staged = self.inner.stage_remove(id)?;
        let removed = self.inner.persist(staged)?;
        info!(supplier_id = %removed.id(), "supplier removed");
        Ok(removed)
    }

    /// Id and name pairs for pickers, in stored order.
    pub fn options(&self) -> Vec<SupplierOption> {
        self.list().iter().map(SupplierOption::from).collect()
    }

    /// Name of the supplier with `id`, if it still exists.
    pub fn name_of(&self, id: &SupplierId) -> Option<&str> {
        self.find(id).map(Supplier::name)
    }
}
