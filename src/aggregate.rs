use crate::loader::Table;
use chrono::{NaiveDateTime, Timelike};
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Number of equal-width price bins used by the spending pattern view.
pub const PRICE_BINS: usize = 5;

/// The four fixed analyses a user can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisMode {
    SalesOverTime,
    PopularCategories,
    SpendingPatterns,
    PeakHours,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 4] = [
        AnalysisMode::SalesOverTime,
        AnalysisMode::PopularCategories,
        AnalysisMode::SpendingPatterns,
        AnalysisMode::PeakHours,
    ];

    /// Label shown next to the radio button.
    pub fn label(self) -> &'static str {
        match self {
            AnalysisMode::SalesOverTime => "Total Sales Over Time",
            AnalysisMode::PopularCategories => "Popular Categories",
            AnalysisMode::SpendingPatterns => "Customer Spending Patterns",
            AnalysisMode::PeakHours => "Peak Shopping Hours",
        }
    }

    /// Accepts a 1-based index, the full label, or a short keyword.
    pub fn parse(input: &str) -> Option<AnalysisMode> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied());
        }
        let lower = input.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.label().to_lowercase() == lower)
            .or(match lower.as_str() {
                "time" | "over-time" | "trend" => Some(AnalysisMode::SalesOverTime),
                "category" | "categories" => Some(AnalysisMode::PopularCategories),
                "spending" | "price" | "prices" => Some(AnalysisMode::SpendingPatterns),
                "hour" | "hours" | "peak" => Some(AnalysisMode::PeakHours),
                _ => None,
            })
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// One price bucket. Covers `(lower, upper]`, except the first bucket which
/// also contains `lower`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl PriceBin {
    pub fn label(&self, first: bool) -> String {
        let open = if first { '[' } else { '(' };
        format!("{}{:.2}, {:.2}]", open, self.lower, self.upper)
    }
}

/// Result of one analysis, typed by mode.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregatedView {
    OverTime(Vec<(NaiveDateTime, f64)>),
    ByCategory(Vec<CategoryTotal>),
    PriceDistribution(Vec<PriceBin>),
    ByHour(Vec<(u32, f64)>),
}

impl AggregatedView {
    pub fn len(&self) -> usize {
        match self {
            AggregatedView::OverTime(v) => v.len(),
            AggregatedView::ByCategory(v) => v.len(),
            AggregatedView::PriceDistribution(v) => v.len(),
            AggregatedView::ByHour(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(key label, value)` pairs in display order.
    pub fn entries(&self) -> Vec<(String, f64)> {
        match self {
            AggregatedView::OverTime(v) => v
                .iter()
                .map(|(date, total)| (format_timestamp(date), *total))
                .collect(),
            AggregatedView::ByCategory(v) => v
                .iter()
                .map(|c| (c.category.clone(), c.total))
                .collect(),
            AggregatedView::PriceDistribution(v) => v
                .iter()
                .enumerate()
                .map(|(i, bin)| (bin.label(i == 0), bin.count as f64))
                .collect(),
            AggregatedView::ByHour(v) => v
                .iter()
                .map(|(hour, total)| (hour.to_string(), *total))
                .collect(),
        }
    }
}

/// Dates at midnight print without the time part.
pub fn format_timestamp(date: &NaiveDateTime) -> String {
    if date.num_seconds_from_midnight() == 0 && date.nanosecond() == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        date.format("%Y-%m-%d %H:%M").to_string()
    }
}

pub fn aggregate(table: &Table, mode: AnalysisMode) -> AggregatedView {
    let view = match mode {
        AnalysisMode::SalesOverTime => AggregatedView::OverTime(sales_over_time(table)),
        AnalysisMode::PopularCategories => AggregatedView::ByCategory(sales_by_category(table)),
        AnalysisMode::SpendingPatterns => {
            AggregatedView::PriceDistribution(price_distribution(table))
        }
        AnalysisMode::PeakHours => AggregatedView::ByHour(sales_by_hour(table)),
    };
    debug!("Aggregated {} rows for {:?} into {} keys", table.len(), mode, view.len());
    view
}

/// Total sales per distinct Date value, oldest first.
pub fn sales_over_time(table: &Table) -> Vec<(NaiveDateTime, f64)> {
    let mut by_date: BTreeMap<NaiveDateTime, f64> = BTreeMap::new();
    for tx in table.iter() {
        *by_date.entry(tx.date).or_insert(0.0) += tx.total_sales;
    }
    by_date.into_iter().collect()
}

/// Total sales per category, largest first. Equal totals keep the order in
/// which the categories first appear in the table.
pub fn sales_by_category(table: &Table) -> Vec<CategoryTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for tx in table.iter() {
        let slot = *index.entry(tx.category.as_str()).or_insert_with(|| {
            totals.push(CategoryTotal {
                category: tx.category.clone(),
                total: 0.0,
            });
            totals.len() - 1
        });
        totals[slot].total += tx.total_sales;
    }
    // stable
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Counts rows in five equal-width price buckets between the cheapest and the
/// most expensive price.
pub fn price_distribution(table: &Table) -> Vec<PriceBin> {
    if table.is_empty() {
        return Vec::new();
    }

    let (mut lo, mut hi) = table
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), tx| {
            (lo.min(tx.price), hi.max(tx.price))
        });
    if lo == hi {
        let pad = if lo == 0.0 { 0.001 } else { lo.abs() * 0.001 };
        lo -= pad;
        hi += pad;
    }

    let edges = bin_edges(lo, hi);
    let mut bins: Vec<PriceBin> = edges
        .windows(2)
        .map(|pair| PriceBin {
            lower: pair[0],
            upper: pair[1],
            count: 0,
        })
        .collect();

    for tx in table.iter() {
        bins[bin_index(&edges, tx.price)].count += 1;
    }
    bins
}

fn bin_edges(lo: f64, hi: f64) -> Vec<f64> {
    let width = (hi - lo) / PRICE_BINS as f64;
    let mut edges: Vec<f64> = (0..PRICE_BINS).map(|i| lo + width * i as f64).collect();
    edges.push(hi);
    edges
}

// Right-closed buckets: a price sitting exactly on an edge belongs to the
// bucket below it, and the minimum itself goes to the first bucket.
fn bin_index(edges: &[f64], price: f64) -> usize {
    edges[1..]
        .partition_point(|edge| *edge < price)
        .min(PRICE_BINS - 1)
}

/// Total sales per hour of the Date field, hours without sales omitted.
pub fn sales_by_hour(table: &Table) -> Vec<(u32, f64)> {
    let mut by_hour: BTreeMap<u32, f64> = BTreeMap::new();
    for tx in table.iter() {
        *by_hour.entry(tx.date.hour()).or_insert(0.0) += tx.total_sales;
    }
    by_hour.into_iter().collect()
}
