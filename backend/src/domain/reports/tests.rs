//! Tests for report aggregation.

use rstest::rstest;
use rust_decimal::Decimal;

use super::*;
use crate::domain::export::to_csv;
use crate::test_support::{priced_product, product_id, sample_product, sample_sale, sample_supplier};

#[rstest]
fn sales_stats_on_empty_ledger_are_zero() {
    let stats = sales_stats(&[]);
    assert_eq!(stats.total_sales, 0);
    assert_eq!(stats.total_revenue, Decimal::ZERO);
    assert_eq!(stats.average_order_value, Decimal::ZERO);
    assert!(stats.monthly.is_empty());
}

#[rstest]
fn sales_stats_roll_up_by_month() {
    let sales = [
        sample_sale("1", "1", 2, "2025-05-01T10:30:00Z"),
        sample_sale("2", "2", 1, "2025-05-31T23:59:59Z"),
        sample_sale("3", "1", 3, "2025-06-01T00:00:00Z"),
    ];
    let stats = sales_stats(&sales);
    assert_eq!(stats.total_sales, 3);
    assert_eq!(stats.total_revenue, Decimal::from(600));
    assert_eq!(stats.average_order_value, Decimal::from(200));
    assert_eq!(
        stats.monthly.get("2025-05"),
        Some(&MonthlySales {
            count: 2,
            revenue: Decimal::from(300)
        })
    );
    let months: Vec<String> = stats.monthly_rows().into_iter().map(|row| row.month).collect();
    assert_eq!(months, ["2025-05", "2025-06"]);
}

#[rstest]
fn top_sellers_sum_quantities_per_product() {
    let products = [
        sample_product("A", Category::Processor, 10, 1),
        sample_product("B", Category::Ram, 10, 1),
    ];
    let sales = [
        sample_sale("1", "A", 3, "2025-05-01T10:00:00Z"),
        sample_sale("2", "B", 1, "2025-05-02T10:00:00Z"),
        sample_sale("3", "A", 3, "2025-05-03T10:00:00Z"),
    ];
    let ranked = top_selling_products(&sales, &products, 5);
    let summary: Vec<(&str, u64)> = ranked
        .iter()
        .map(|row| (row.product_id.as_str(), row.total_quantity))
        .collect();
    assert_eq!(summary, [("A", 6), ("B", 1)]);
    assert_eq!(ranked.first().map(|row| row.total_revenue), Some(Decimal::from(600)));
}

#[rstest]
fn top_sellers_ties_keep_first_seen_order_and_respect_limit() {
    let products = [
        sample_product("A", Category::Processor, 10, 1),
        sample_product("B", Category::Ram, 10, 1),
        sample_product("C", Category::Storage, 10, 1),
    ];
    let sales = [
        sample_sale("1", "B", 2, "2025-05-01T10:00:00Z"),
        sample_sale("2", "C", 1, "2025-05-01T11:00:00Z"),
        sample_sale("3", "A", 2, "2025-05-01T12:00:00Z"),
    ];
    let ids: Vec<String> = top_selling_products(&sales, &products, 2)
        .into_iter()
        .map(|row| row.product_id.to_string())
        .collect();
    assert_eq!(ids, ["B", "A"]);
}

#[rstest]
fn top_sellers_skip_deleted_products() {
    let products = [sample_product("A", Category::Processor, 10, 1)];
    let sales = [
        sample_sale("1", "gone", 9, "2025-05-01T10:00:00Z"),
        sample_sale("2", "A", 1, "2025-05-01T11:00:00Z"),
    ];
    let ranked = top_selling_products(&sales, &products, 5);
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked.first().map(|row| &row.product_id), Some(&product_id("A")));
}

#[rstest]
fn category_report_covers_every_category() {
    let products = [
        priced_product("1", "Cheap", Category::Processor, "1", 100, 2, 1),
        priced_product("2", "Pricey", Category::Processor, "1", 300, 1, 1),
        priced_product("3", "Pricey Twin", Category::Processor, "1", 300, 1, 1),
    ];
    let rows = category_report(&products);
    let order: Vec<Category> = rows.iter().map(|row| row.category).collect();
    assert_eq!(order, Category::ALL);

    let processor = rows.first().expect("processor row");
    assert_eq!(processor.total_items, 3);
    assert_eq!(processor.total_value, Decimal::from(800));
    assert_eq!(processor.most_expensive.as_deref(), Some("Pricey"));
    assert_eq!(processor.least_expensive.as_deref(), Some("Cheap"));
    assert_eq!(processor.fields().get(3).map(String::as_str), Some("266.67"));

    let chassis = rows.last().expect("chassis row");
    assert_eq!(chassis.total_items, 0);
    assert_eq!(chassis.average_price, Decimal::ZERO);
    assert!(chassis.most_expensive.is_none());
    assert_eq!(chassis.fields().get(4).map(String::as_str), Some("N/A"));
}

#[rstest]
fn supplier_report_counts_linked_products() {
    let suppliers = [
        sample_supplier("1", "AMD Official"),
        sample_supplier("2", "MSI Bangladesh"),
    ];
    let products = [
        priced_product("1", "Ryzen 5", Category::Processor, "1", 100, 10, 2),
        priced_product("2", "DDR4", Category::Ram, "1", 50, 1, 2),
        priced_product("3", "Ryzen 7", Category::Processor, "1", 200, 1, 0),
        priced_product("4", "Orphan", Category::Storage, "999", 10, 1, 0),
    ];
    let rows = supplier_report(&suppliers, &products);
    assert_eq!(rows.len(), 2);

    let amd = rows.first().expect("amd row");
    assert_eq!(amd.total_products, 3);
    assert_eq!(amd.inventory_value, Decimal::from(1250));
    assert_eq!(amd.categories, [Category::Processor, Category::Ram]);
    assert_eq!(amd.low_stock_items, 1);

    let msi = rows.last().expect("msi row");
    assert_eq!(msi.total_products, 0);
    assert_eq!(msi.inventory_value, Decimal::ZERO);

    let csv = to_csv(&rows);
    assert!(csv.contains(",\"Processor, RAM\","));
}

#[rstest]
#[case(InventoryFilter::default(), &["1", "2", "3"])]
#[case(InventoryFilter { category: Some(Category::Processor), status: None }, &["1", "3"])]
#[case(InventoryFilter { category: None, status: Some(StockStatus::OutOfStock) }, &["3"])]
#[case(InventoryFilter { category: None, status: Some(StockStatus::LowStock) }, &["2"])]
#[case(InventoryFilter { category: Some(Category::Ram), status: Some(StockStatus::InStock) }, &[])]
fn inventory_report_applies_filters(#[case] filter: InventoryFilter, #[case] expected: &[&str]) {
    let products = [
        sample_product("1", Category::Processor, 10, 2),
        sample_product("2", Category::Ram, 2, 2),
        sample_product("3", Category::Processor, 0, 1),
    ];
    let ids: Vec<String> = inventory_report(&products, &[], filter)
        .into_iter()
        .map(|row| row.product_id.to_string())
        .collect();
    assert_eq!(ids, expected);
}

#[rstest]
fn inventory_report_names_suppliers() {
    let suppliers = [sample_supplier("1", "AMD Official")];
    let products = [
        priced_product("1", "Ryzen 5", Category::Processor, "1", 100, 10, 2),
        priced_product("2", "Orphan", Category::Storage, "999", 10, 1, 0),
    ];
    let rows = inventory_report(&products, &suppliers, InventoryFilter::default());
    let names: Vec<&str> = rows.iter().map(|row| row.supplier.as_str()).collect();
    assert_eq!(names, ["AMD Official", UNKNOWN_SUPPLIER]);
    assert_eq!(rows.first().map(|row| row.value), Some(Decimal::from(1000)));
}

#[rstest]
fn low_stock_report_suggests_reorder_amounts() {
    let products = [
        sample_product("1", Category::Processor, 2, 5),
        sample_product("2", Category::Ram, 0, 3),
        sample_product("3", Category::Storage, 9, 3),
        sample_product("4", Category::Chassis, 4, 4),
    ];
    let rows = low_stock_report(&products, &[]);
    let summary: Vec<(&str, u32, StockStatus)> = rows
        .iter()
        .map(|row| (row.product_id.as_str(), row.reorder_quantity, row.status))
        .collect();
    assert_eq!(summary, [
        ("1", 8, StockStatus::LowStock),
        ("2", 6, StockStatus::OutOfStock),
        ("4", 4, StockStatus::LowStock),
    ]);
}
