use crate::config::{SAMPLE_DAYS, SAMPLE_FIRST_DAY, SAMPLE_PRODUCTS};
use crate::error::LoadError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info};
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

/// Columns an uploaded CSV must carry. `Total_Sales` is optional.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Product", "Category", "Price", "Quantity"];

/// One sales record.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: NaiveDateTime,
    pub product: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
    pub total_sales: f64,
}

/// Ordered collection of transactions, kept in file (or generation) order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Transaction>,
}

impl Table {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }
}

impl FromIterator<Transaction> for Table {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Table::new(iter.into_iter().collect())
    }
}

// Raw CSV row. Numbers stay textual so a bad cell can be reported with its row.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Product")]
    product: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Total_Sales", default)]
    total_sales: Option<String>,
}

fn check_headers(headers: &StringRecord) -> Result<(), LoadError> {
    for &expected in &REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == expected) {
            return Err(LoadError::MissingColumn(expected.to_string()));
        }
    }
    Ok(())
}

fn parse_number<T: std::str::FromStr>(row: usize, column: &str, value: &str) -> Result<T, LoadError> {
    value.parse::<T>().map_err(|_| LoadError::InvalidField {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses the Date column. Pure calendar dates become midnight; offsets in
/// RFC 3339 strings are dropped and the local wall-clock time is kept.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    for format in &DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}

fn convert_row(row: usize, raw: CsvRow) -> Result<Transaction, LoadError> {
    let date = parse_date(&raw.date).ok_or_else(|| LoadError::InvalidDate {
        row,
        value: raw.date.clone(),
    })?;
    let price: f64 = parse_number(row, "Price", &raw.price)?;
    let quantity: u32 = parse_number(row, "Quantity", &raw.quantity)?;
    let total_sales = match raw.total_sales.as_deref() {
        Some(total) if !total.is_empty() => parse_number(row, "Total_Sales", total)?,
        _ => price * quantity as f64,
    };

    Ok(Transaction {
        date,
        product: raw.product,
        category: raw.category,
        price,
        quantity,
        total_sales,
    })
}

/// Reads a sales CSV.
///
/// The header row must name every column in [`REQUIRED_COLUMNS`]; extra
/// columns are ignored. A present `Total_Sales` value is taken as-is, a missing
/// column is derived as `Price * Quantity`. Row numbers in errors count data
/// rows from 1.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Table, LoadError> {
    let path = path.as_ref();
    info!("Loading sales data from {}", path.display());

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;
    check_headers(rdr.headers()?)?;

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let raw = result?;
        rows.push(convert_row(index + 1, raw)?);
    }

    info!("Loaded {} transactions", rows.len());
    Ok(Table::new(rows))
}

/// Builds the January 2024 sample table with the thread-local generator.
pub fn load_sample() -> Table {
    load_sample_with(&mut rand::thread_rng())
}

/// Builds the sample table: every product on every day of the month, with
/// Electronics priced in `[50, 1000)` and everything else in `[20, 200)`.
pub fn load_sample_with<R: Rng + ?Sized>(rng: &mut R) -> Table {
    let mut rows = Vec::with_capacity(SAMPLE_DAYS as usize * SAMPLE_PRODUCTS.len());

    for day in SAMPLE_FIRST_DAY.iter_days().take(SAMPLE_DAYS as usize) {
        let date = day.and_time(NaiveTime::MIN);
        for (product, category) in SAMPLE_PRODUCTS {
            let price = if category == "Electronics" {
                rng.gen_range(50.0..1000.0)
            } else {
                rng.gen_range(20.0..200.0)
            };
            let quantity: u32 = rng.gen_range(1..10);
            rows.push(Transaction {
                date,
                product: product.to_string(),
                category: category.to_string(),
                price,
                quantity,
                total_sales: price * quantity as f64,
            });
        }
    }

    debug!("Generated {} sample transactions", rows.len());
    Table::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn parse_date_accepts_date_only() {
        let dt = parse_date("2024-01-05").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(dt.hour(), 0);
    }

    #[test]
    fn parse_date_keeps_time_of_day() {
        assert_eq!(parse_date("2024-01-05 14:30:00").unwrap().hour(), 14);
        assert_eq!(parse_date("2024-01-05T09:15").unwrap().hour(), 9);
        assert_eq!(parse_date("2024-01-05T18:00:00+02:00").unwrap().hour(), 18);
        assert_eq!(parse_date("01/05/2024 07:45").unwrap().hour(), 7);
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_none());
        assert!(parse_date("2024-13-40").is_none());
        assert!(parse_date("").is_none());
    }
}
