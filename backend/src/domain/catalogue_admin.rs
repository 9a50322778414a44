//! Role-gated product and supplier management.
//!
//! Admins and managers may edit the catalogue; staff may only read it.

use super::ports::CollectionStore;
use super::{
    Capability, Error, NewProduct, NewSupplier, Product, ProductId, ProductPatch,
    ProductRepository, SessionService, Supplier, SupplierId, SupplierPatch, SupplierRepository,
};

/// Create a product.
pub fn add_product<S: CollectionStore>(
    session: &SessionService<S>,
    products: &mut ProductRepository<S>,
    draft: NewProduct,
) -> Result<Product, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    products.add(draft)
}

/// Edit a product.
pub fn update_product<S: CollectionStore>(
    session: &SessionService<S>,
    products: &mut ProductRepository<S>,
    id: &ProductId,
    patch: ProductPatch,
) -> Result<Product, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    products.update(id, patch)
}

/// Delete a product.
pub fn delete_product<S: CollectionStore>(
    session: &SessionService<S>,
    products: &mut ProductRepository<S>,
    id: &ProductId,
) -> Result<Product, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    products.remove(id)
}

/// Create a supplier.
pub fn add_supplier<S: CollectionStore>(
    session: &SessionService<S>,
    suppliers: &mut SupplierRepository<S>,
    draft: NewSupplier,
) -> Result<Supplier, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    suppliers.add(draft)
}

/// Edit a supplier.
pub fn update_supplier<S: CollectionStore>(
    session: &SessionService<S>,
    suppliers: &mut SupplierRepository<S>,
    id: &SupplierId,
    patch: SupplierPatch,
) -> Result<Supplier, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    suppliers.update(id, patch)
}

/// Delete a supplier. Products keep their dangling reference.
pub fn delete_supplier<S: CollectionStore>(
    session: &SessionService<S>,
    suppliers: &mut SupplierRepository<S>,
    id: &SupplierId,
) -> Result<Supplier, Error> {
    session.authorize(Capability::ManageCatalogue)?;
    suppliers.remove(id)
}
