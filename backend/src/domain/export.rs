//! CSV rendering for report rows.
//!
//! The format is deliberately small: a header row, one row per record,
//! `,` between fields and `\n` between rows. A field containing a comma is
//! wrapped in double quotes; embedded quotes are not escaped.

/// A flat record with a fixed column layout.
pub trait CsvRecord {
    /// Column names, in output order.
    const HEADERS: &'static [&'static str];

    /// Field values, one per header.
    fn fields(&self) -> Vec<String>;
}

/// Render `records` as CSV text. An empty slice renders as `""`.
///
/// # Examples
/// ```
/// use stockroom::domain::export::{CsvRecord, to_csv};
///
/// struct Row(&'static str, u32);
///
/// impl CsvRecord for Row {
///     const HEADERS: &'static [&'static str] = &["Name", "Quantity"];
///
///     fn fields(&self) -> Vec<String> {
///         vec![self.0.to_owned(), self.1.to_string()]
///     }
/// }
///
/// let csv = to_csv(&[Row("Dhaka, Bangladesh", 3)]);
/// assert_eq!(csv, "Name,Quantity\n\"Dhaka, Bangladesh\",3");
/// assert_eq!(to_csv::<Row>(&[]), "");
/// ```
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    if records.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(R::HEADERS.join(","));
    for record in records {
        let row: Vec<String> = record.fields().into_iter().map(quote_if_needed).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn quote_if_needed(value: String) -> String {
    if value.contains(',') {
        format!("\"{value}\"")
    } else {
        value
    }
}
