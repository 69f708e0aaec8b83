//! Whole-dataset summary and the two report files.

use crate::aggregate::{sales_by_category, CategoryTotal};
use crate::chart::ChartCanvas;
use crate::config::{REPORT_FILE_NAME, SNAPSHOT_FILE_NAME};
use crate::error::WriteError;
use crate::loader::Table;
use crate::snapshot;
use chrono::{Local, NaiveDateTime};
use log::{info, warn};
use num_format::{Locale, ToFormattedString};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: u64,
}

/// Figures printed in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_sales: f64,
    pub transactions: usize,
    pub average_transaction: f64,
    pub categories: Vec<CategoryTotal>,
    pub products: Vec<ProductQuantity>,
}

impl Summary {
    pub fn from_table(table: &Table) -> Self {
        let total_sales = table.iter().fold(0.0, |acc, tx| acc + tx.total_sales);
        let transactions = table.len();
        let average_transaction = if transactions == 0 {
            0.0
        } else {
            total_sales / transactions as f64
        };

        Summary {
            total_sales,
            transactions,
            average_transaction,
            categories: sales_by_category(table),
            products: quantity_by_product(table),
        }
    }
}

/// Units sold per product, largest first. Ties keep first-appearance order.
pub fn quantity_by_product(table: &Table) -> Vec<ProductQuantity> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<ProductQuantity> = Vec::new();
    for tx in table.iter() {
        let slot = *index.entry(tx.product.as_str()).or_insert_with(|| {
            totals.push(ProductQuantity {
                product: tx.product.clone(),
                quantity: 0,
            });
            totals.len() - 1
        });
        totals[slot].quantity += tx.quantity as u64;
    }
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals
}

/// `$1,234.50` style amount.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let whole = whole
        .parse::<u64>()
        .map(|n| n.to_formatted_string(&Locale::en))
        .unwrap_or_else(|_| whole.to_string());
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, whole, cents)
}

pub fn format_count(count: usize) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Renders the text report.
pub fn format_report(summary: &Summary, generated_at: NaiveDateTime) -> String {
    let mut out = format!(
        "Shopping Trends Analysis Report\n\
         Generated on: {}\n\
         \n\
         Summary Statistics:\n\
         ------------------\n\
         Total Sales: {}\n\
         Total Transactions: {}\n\
         Average Transaction Value: {}\n\
         \n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        format_currency(summary.total_sales),
        format_count(summary.transactions),
        format_currency(summary.average_transaction),
    );

    out.push_str("Top Categories by Sales:\n");
    let width = column_width("Category", summary.categories.iter().map(|c| c.category.as_str()));
    out.push_str(&format!("{:<width$}  {:>14}\n", "Category", "Total_Sales"));
    for c in &summary.categories {
        out.push_str(&format!("{:<width$}  {:>14.2}\n", c.category, c.total));
    }
    out.push('\n');

    out.push_str("Top Products by Quantity:\n");
    let width = column_width("Product", summary.products.iter().map(|p| p.product.as_str()));
    out.push_str(&format!("{:<width$}  {:>10}\n", "Product", "Quantity"));
    for p in &summary.products {
        out.push_str(&format!("{:<width$}  {:>10}\n", p.product, p.quantity));
    }
    out
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .fold(header.chars().count(), usize::max)
}

/// What a report request did.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    Written {
        report_path: PathBuf,
        snapshot_path: PathBuf,
    },
    /// Nothing is loaded; no files were touched.
    NoData,
}

/// Writes `analysis_report.txt` and `visualization.png` into `out_dir`,
/// creating the directory when needed. Existing files are overwritten.
pub fn write_report(
    table: Option<&Table>,
    canvas: &ChartCanvas,
    out_dir: &Path,
    snapshot_size: (u32, u32),
) -> Result<ReportOutcome, WriteError> {
    write_report_at(table, canvas, out_dir, snapshot_size, Local::now().naive_local())
}

pub fn write_report_at(
    table: Option<&Table>,
    canvas: &ChartCanvas,
    out_dir: &Path,
    snapshot_size: (u32, u32),
    generated_at: NaiveDateTime,
) -> Result<ReportOutcome, WriteError> {
    let Some(table) = table else {
        warn!("Report requested with no data loaded");
        return Ok(ReportOutcome::NoData);
    };

    fs::create_dir_all(out_dir).map_err(|e| WriteError::io(out_dir, e))?;

    let snapshot_path = out_dir.join(SNAPSHOT_FILE_NAME);
    snapshot::save_png(canvas, &snapshot_path, snapshot_size)?;

    let report_path = out_dir.join(REPORT_FILE_NAME);
    let text = format_report(&Summary::from_table(table), generated_at);
    fs::write(&report_path, text).map_err(|e| WriteError::io(&report_path, e))?;

    info!("Report saved in {}", out_dir.display());
    Ok(ReportOutcome::Written {
        report_path,
        snapshot_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_has_separators_and_cents() {
        assert_eq!(format_currency(1050.0), "$1,050.00");
        assert_eq!(format_currency(525.0), "$525.00");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(1234567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.5), "-$42.50");
    }

    #[test]
    fn count_has_separators() {
        assert_eq!(format_count(2), "2");
        assert_eq!(format_count(155), "155");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
