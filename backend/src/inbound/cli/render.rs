//! Plain-text rendering for CLI output.

use serde::Serialize;

use super::{CliError, OutputFormat};
use crate::domain::export::{CsvRecord, to_csv};
use crate::domain::{ProductStats, Sale, SalesStats, Supplier, User};

const EMPTY: &str = "no records";

/// One-line account summary.
pub(super) fn user_line(user: &User) -> String {
    let last_login = user
        .last_login()
        .map_or_else(|| "never".to_owned(), |at| at.to_rfc3339());
    format!(
        "{}  {} <{}> ({}), last login {}",
        user.id(),
        user.name(),
        user.email(),
        user.role(),
        last_login
    )
}

/// Render report rows in the requested format.
pub(super) fn rows<R>(records: &[R], format: OutputFormat) -> Result<String, CliError>
where
    R: CsvRecord + Serialize,
{
    match format {
        OutputFormat::Table => Ok(table(records)),
        OutputFormat::Csv => Ok(to_csv(records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}

/// Left-aligned columns separated by two spaces.
pub(super) fn table<R: CsvRecord>(records: &[R]) -> String {
    if records.is_empty() {
        return EMPTY.to_owned();
    }
    let body: Vec<Vec<String>> = records.iter().map(CsvRecord::fields).collect();
    let mut widths: Vec<usize> = R::HEADERS.iter().map(|header| header.chars().count()).collect();
    for row in &body {
        for (width, field) in widths.iter_mut().zip(row) {
            *width = (*width).max(field.chars().count());
        }
    }

    let header: Vec<String> = R::HEADERS.iter().map(|header| (*header).to_owned()).collect();
    std::iter::once(&header)
        .chain(&body)
        .map(|row| pad_row(row, &widths))
        .collect::<Vec<_>>()
        .join("\n")
}

fn pad_row(row: &[String], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .map(|(field, &width)| format!("{field:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_owned()
}

struct SupplierLine<'a>(&'a Supplier);

impl CsvRecord for SupplierLine<'_> {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Contact Person", "Email", "Phone"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.0.id().to_string(),
            self.0.name().to_owned(),
            self.0.contact_person().to_owned(),
            self.0.email().to_string(),
            self.0.phone().to_owned(),
        ]
    }
}

pub(super) fn suppliers(records: &[Supplier]) -> String {
    table(&records.iter().map(SupplierLine).collect::<Vec<_>>())
}

struct SaleLine<'a>(&'a Sale);

impl CsvRecord for SaleLine<'_> {
    const HEADERS: &'static [&'static str] = &[
        "ID", "Product", "Quantity", "Price", "Total", "Customer", "Sold By", "Sold At",
    ];

    fn fields(&self) -> Vec<String> {
        let sale = self.0;
        vec![
            sale.id().to_string(),
            sale.product_id().to_string(),
            sale.quantity().to_string(),
            sale.price().to_string(),
            sale.total_price().to_string(),
            sale.customer().name.clone(),
            sale.sold_by().to_string(),
            sale.sold_at().to_rfc3339(),
        ]
    }
}

pub(super) fn sales(records: &[&Sale]) -> String {
    table(&records.iter().map(|sale| SaleLine(sale)).collect::<Vec<_>>())
}

pub(super) fn product_stats(stats: &ProductStats) -> String {
    let mut lines = vec![
        format!("products:        {}", stats.total_products),
        format!("inventory value: {}", stats.total_value),
        format!("low stock:       {}", stats.low_stock_count),
    ];
    lines.extend(
        stats
            .category_counts
            .iter()
            .map(|(category, count)| format!("  {:<14} {count}", format!("{category}:"))),
    );
    lines.join("\n")
}

pub(super) fn sales_stats(stats: &SalesStats) -> String {
    let mut lines = vec![
        format!("sales:               {}", stats.total_sales),
        format!("revenue:             {}", stats.total_revenue),
        format!("average order value: {}", stats.average_order_value.round_dp(2)),
    ];
    if !stats.monthly.is_empty() {
        lines.push(String::new());
        lines.push(table(&stats.monthly_rows()));
    }
    lines.join("\n")
}
