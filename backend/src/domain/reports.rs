//! Aggregate reports over repository snapshots.
//!
//! Every function here is pure: it takes the current collections and
//! recomputes from scratch. Row types implement [`CsvRecord`] so any report
//! can be exported.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use super::export::CsvRecord;
use super::{Category, Product, ProductId, Sale, StockStatus, Supplier, SupplierId};

/// Supplier label used when a product points at a deleted supplier.
pub const UNKNOWN_SUPPLIER: &str = "Unknown";

/// Sales count and revenue for one calendar month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySales {
    /// Number of sales.
    pub count: usize,
    /// Sum of sale totals.
    pub revenue: Decimal,
}

/// Ledger-wide totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    /// Number of sales.
    pub total_sales: usize,
    /// Sum of sale totals.
    pub total_revenue: Decimal,
    /// Revenue divided by sale count; zero when there are no sales.
    pub average_order_value: Decimal,
    /// Rollup keyed by `YYYY-MM` of `sold_at`.
    pub monthly: BTreeMap<String, MonthlySales>,
}

/// Compute ledger totals and the monthly rollup.
pub fn sales_stats(sales: &[Sale]) -> SalesStats {
    let total_revenue = sales
        .iter()
        .map(Sale::total_price)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let mut monthly: BTreeMap<String, MonthlySales> = BTreeMap::new();
    for sale in sales {
        let bucket = monthly
            .entry(sale.sold_at().format("%Y-%m").to_string())
            .or_default();
        bucket.count += 1;
        bucket.revenue = bucket.revenue.saturating_add(sale.total_price());
    }
    SalesStats {
        total_sales: sales.len(),
        total_revenue,
        average_order_value: total_revenue
            .checked_div(Decimal::from(sales.len()))
            .unwrap_or(Decimal::ZERO),
        monthly,
    }
}

/// One month of the sales rollup, flattened for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySalesRow {
    /// `YYYY-MM`.
    pub month: String,
    /// Number of sales.
    pub count: usize,
    /// Sum of sale totals.
    pub revenue: Decimal,
}

impl SalesStats {
    /// Monthly buckets in chronological order.
    pub fn monthly_rows(&self) -> Vec<MonthlySalesRow> {
        self.monthly
            .iter()
            .map(|(month, bucket)| MonthlySalesRow {
                month: month.clone(),
                count: bucket.count,
                revenue: bucket.revenue,
            })
            .collect()
    }
}

impl CsvRecord for MonthlySalesRow {
    const HEADERS: &'static [&'static str] = &["Month", "Sales", "Revenue"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.month.clone(),
            self.count.to_string(),
            self.revenue.to_string(),
        ]
    }
}

/// Units and revenue sold for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopSeller {
    /// Product sold.
    pub product_id: ProductId,
    /// Current product name.
    pub product_name: String,
    /// Units sold across all sales.
    pub total_quantity: u64,
    /// Sum of sale totals.
    pub total_revenue: Decimal,
}

/// Rank products by units sold, best first.
///
/// Equal quantities keep the order in which the product first appears in
/// the ledger. Sales of products that no longer exist are skipped.
pub fn top_selling_products(sales: &[Sale], products: &[Product], limit: usize) -> Vec<TopSeller> {
    let names: HashMap<&ProductId, &str> = products
        .iter()
        .map(|product| (product.id(), product.name()))
        .collect();
    let mut ranked: Vec<TopSeller> = Vec::new();
    let mut positions: HashMap<&ProductId, usize> = HashMap::new();
    for sale in sales {
        let Some(name) = names.get(sale.product_id()) else {
            continue;
        };
        let position = *positions.entry(sale.product_id()).or_insert_with(|| {
            ranked.push(TopSeller {
                product_id: sale.product_id().clone(),
                product_name: (*name).to_owned(),
                total_quantity: 0,
                total_revenue: Decimal::ZERO,
            });
            ranked.len() - 1
        });
        if let Some(entry) = ranked.get_mut(position) {
            entry.total_quantity += u64::from(sale.quantity());
            entry.total_revenue = entry.total_revenue.saturating_add(sale.total_price());
        }
    }
    ranked.sort_by(|left, right| right.total_quantity.cmp(&left.total_quantity));
    ranked.truncate(limit);
    ranked
}

impl CsvRecord for TopSeller {
    const HEADERS: &'static [&'static str] = &["Product", "Units Sold", "Revenue"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.product_name.clone(),
            self.total_quantity.to_string(),
            self.total_revenue.to_string(),
        ]
    }
}

/// Distribution of the catalogue across one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReportRow {
    /// Category summarised.
    pub category: Category,
    /// Number of products.
    pub total_items: usize,
    /// Sum of price times quantity.
    pub total_value: Decimal,
    /// `total_value / total_items`; zero when empty.
    pub average_price: Decimal,
    /// Name of the highest-priced product.
    pub most_expensive: Option<String>,
    /// Name of the lowest-priced product.
    pub least_expensive: Option<String>,
}

/// Summarise every category, in category order, including empty ones.
///
/// The average divides stock value by item count, so it weights each
/// product's price by its quantity.
pub fn category_report(products: &[Product]) -> Vec<CategoryReportRow> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let members: Vec<&Product> = products
                .iter()
                .filter(|product| product.category() == category)
                .collect();
            let total_value = members
                .iter()
                .map(|product| product.stock_value())
                .fold(Decimal::ZERO, Decimal::saturating_add);
            let mut most: Option<&Product> = None;
            let mut least: Option<&Product> = None;
            for product in members.iter().copied() {
                if most.is_none_or(|current| product.price() > current.price()) {
                    most = Some(product);
                }
                if least.is_none_or(|current| product.price() < current.price()) {
                    least = Some(product);
                }
            }
            CategoryReportRow {
                category,
                total_items: members.len(),
                total_value,
                average_price: total_value
                    .checked_div(Decimal::from(members.len()))
                    .unwrap_or(Decimal::ZERO),
                most_expensive: most.map(|product| product.name().to_owned()),
                least_expensive: least.map(|product| product.name().to_owned()),
            }
        })
        .collect()
}

impl CsvRecord for CategoryReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Category",
        "Total Items",
        "Total Value",
        "Average Price",
        "Most Expensive Item",
        "Least Expensive Item",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.category.to_string(),
            self.total_items.to_string(),
            self.total_value.to_string(),
            format!("{:.2}", self.average_price.round_dp(2)),
            self.most_expensive.clone().unwrap_or_else(|| "N/A".to_owned()),
            self.least_expensive.clone().unwrap_or_else(|| "N/A".to_owned()),
        ]
    }
}

/// Catalogue footprint of one supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierReportRow {
    /// Supplier summarised.
    pub supplier_id: SupplierId,
    /// Trading name.
    pub name: String,
    /// Primary contact.
    pub contact_person: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Products referencing this supplier.
    pub total_products: usize,
    /// Stock value of those products.
    pub inventory_value: Decimal,
    /// Distinct categories, in first-seen order.
    pub categories: Vec<Category>,
    /// Those products at or below threshold.
    pub low_stock_items: usize,
}

/// Summarise each supplier, in stored supplier order.
pub fn supplier_report(suppliers: &[Supplier], products: &[Product]) -> Vec<SupplierReportRow> {
    suppliers
        .iter()
        .map(|supplier| {
            let supplied: Vec<&Product> = products
                .iter()
                .filter(|product| product.supplier() == supplier.id())
                .collect();
            let mut categories = Vec::new();
            for product in &supplied {
                if !categories.contains(&product.category()) {
                    categories.push(product.category());
                }
            }
            SupplierReportRow {
                supplier_id: supplier.id().clone(),
                name: supplier.name().to_owned(),
                contact_person: supplier.contact_person().to_owned(),
                email: supplier.email().to_string(),
                phone: supplier.phone().to_owned(),
                total_products: supplied.len(),
                inventory_value: supplied
                    .iter()
                    .map(|product| product.stock_value())
                    .fold(Decimal::ZERO, Decimal::saturating_add),
                categories,
                low_stock_items: supplied.iter().filter(|product| product.is_low_stock()).count(),
            }
        })
        .collect()
}

impl CsvRecord for SupplierReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Supplier Name",
        "Contact Person",
        "Email",
        "Phone",
        "Total Products",
        "Total Inventory Value",
        "Categories",
        "Low Stock Items",
    ];

    fn fields(&self) -> Vec<String> {
        let categories: Vec<&str> = self.categories.iter().map(|c| c.label()).collect();
        vec![
            self.name.clone(),
            self.contact_person.clone(),
            self.email.clone(),
            self.phone.clone(),
            self.total_products.to_string(),
            self.inventory_value.to_string(),
            categories.join(", "),
            self.low_stock_items.to_string(),
        ]
    }
}

/// Optional narrowing for [`inventory_report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Keep only this category.
    pub category: Option<Category>,
    /// Keep only this stock status.
    pub status: Option<StockStatus>,
}

/// One product line of the inventory report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportRow {
    /// Product listed.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// SKU.
    pub sku: String,
    /// Category.
    pub category: Category,
    /// Supplier name or [`UNKNOWN_SUPPLIER`].
    pub supplier: String,
    /// Unit price.
    pub price: Decimal,
    /// Units in stock.
    pub quantity: u32,
    /// Price times quantity.
    pub value: Decimal,
    /// Low-stock threshold.
    pub threshold: u32,
    /// Stock classification.
    pub status: StockStatus,
}

/// List products with supplier names and stock status.
pub fn inventory_report(
    products: &[Product],
    suppliers: &[Supplier],
    filter: InventoryFilter,
) -> Vec<InventoryReportRow> {
    products
        .iter()
        .filter(|product| filter.category.is_none_or(|category| product.category() == category))
        .filter(|product| filter.status.is_none_or(|status| product.stock_status() == status))
        .map(|product| InventoryReportRow {
            product_id: product.id().clone(),
            name: product.name().to_owned(),
            sku: product.sku().to_owned(),
            category: product.category(),
            supplier: supplier_name(suppliers, product.supplier()),
            price: product.price(),
            quantity: product.quantity(),
            value: product.stock_value(),
            threshold: product.threshold(),
            status: product.stock_status(),
        })
        .collect()
}

impl CsvRecord for InventoryReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "SKU",
        "Category",
        "Supplier",
        "Price",
        "Quantity",
        "Value",
        "Low Stock Threshold",
        "Status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.sku.clone(),
            self.category.to_string(),
            self.supplier.clone(),
            self.price.to_string(),
            self.quantity.to_string(),
            self.value.to_string(),
            self.threshold.to_string(),
            self.status.label().to_owned(),
        ]
    }
}

/// One product line of the reorder list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockReportRow {
    /// Product listed.
    pub product_id: ProductId,
    /// Display name.
    pub name: String,
    /// SKU.
    pub sku: String,
    /// Category.
    pub category: Category,
    /// Supplier name or [`UNKNOWN_SUPPLIER`].
    pub supplier: String,
    /// Units in stock.
    pub quantity: u32,
    /// Low-stock threshold.
    pub threshold: u32,
    /// Suggested order size: `threshold * 2 - quantity`.
    pub reorder_quantity: u32,
    /// Out of stock or low stock.
    pub status: StockStatus,
}

/// Products at or below threshold with a suggested reorder amount.
pub fn low_stock_report(products: &[Product], suppliers: &[Supplier]) -> Vec<LowStockReportRow> {
    products
        .iter()
        .filter(|product| product.is_low_stock())
        .map(|product| LowStockReportRow {
            product_id: product.id().clone(),
            name: product.name().to_owned(),
            sku: product.sku().to_owned(),
            category: product.category(),
            supplier: supplier_name(suppliers, product.supplier()),
            quantity: product.quantity(),
            threshold: product.threshold(),
            reorder_quantity: product
                .threshold()
                .saturating_mul(2)
                .saturating_sub(product.quantity()),
            status: product.stock_status(),
        })
        .collect()
}

impl CsvRecord for LowStockReportRow {
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "SKU",
        "Category",
        "Supplier",
        "Current Quantity",
        "Low Stock Threshold",
        "Reorder Amount",
        "Status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.sku.clone(),
            self.category.to_string(),
            self.supplier.clone(),
            self.quantity.to_string(),
            self.threshold.to_string(),
            self.reorder_quantity.to_string(),
            self.status.label().to_owned(),
        ]
    }
}

fn supplier_name(suppliers: &[Supplier], id: &SupplierId) -> String {
    suppliers
        .iter()
        .find(|supplier| supplier.id() == id)
        .map_or_else(|| UNKNOWN_SUPPLIER.to_owned(), |supplier| supplier.name().to_owned())
}

#[cfg(test)]
mod tests;
