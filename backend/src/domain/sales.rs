//! Sales engine.
//!
//! Recording a sale decrements stock and appends to the ledger. Both
//! collections are staged first and handed to the store in one
//! [`CollectionStore::save_all`] call; memory is updated only after the
//! store accepts both documents.

use serde_json::json;
use tracing::{info, warn};

use super::ports::CollectionStore;
use super::repository::map_store_error;
use super::{
    Capability, Error, ProductRepository, Sale, SaleId, SaleRepository, SaleRequest,
    SessionService,
};

/// Record a sale for the logged-in user.
///
/// Checks run in this order: session, request fields, product lookup,
/// stock level. Any failure leaves products and sales untouched.
///
/// `products` and `sales` must be open over the same store; otherwise the
/// sale fails with an internal error before anything is staged.
pub fn record_sale<S: CollectionStore>(
    session: &SessionService<S>,
    products: &mut ProductRepository<S>,
    sales: &mut SaleRepository<S>,
    request: SaleRequest,
) -> Result<Sale, Error> {
    let seller = session.authorize(Capability::RecordSales)?;
    request.validate()?;

    let product = products.get(&request.product_id)?;
    if request.quantity > product.quantity() {
        warn!(
            product_id = %product.id(),
            requested = request.quantity,
            available = product.quantity(),
            "sale refused: insufficient stock"
        );
        return Err(Error::insufficient_stock(format!(
            "only {} units of '{}' in stock",
            product.quantity(),
            product.name()
        ))
        .with_details(json!({
            "productId": product.id().as_str(),
            "requested": request.quantity,
            "available": product.quantity(),
        })));
    }

    if !std::ptr::eq(products.store(), sales.store()) {
        return Err(Error::internal(
            "products and sales are not open over the same store",
        ));
    }

    let sold_at = products.now();
    let staged_stock = products.stage_stock_out(&request.product_id, request.quantity, sold_at)?;
    let sale = Sale::record(SaleId::random(), request, seller.id().clone(), sold_at)?;
    let staged_sale = sales.stage_append(sale)?;

    products
        .store()
        .save_all(&[staged_stock.entry(), staged_sale.entry()])
        .map_err(map_store_error)?;

    let product = products.commit(staged_stock);
    let sale = sales.commit(staged_sale);
    info!(
        sale_id = %sale.id(),
        product_id = %sale.product_id(),
        quantity = sale.quantity(),
        remaining = product.quantity(),
        sold_by = %sale.sold_by(),
        "sale recorded"
    );
    Ok(sale)
}
