use chrono::NaiveDate;
use std::path::PathBuf;

pub const REPORT_FILE_NAME: &str = "analysis_report.txt";
pub const SNAPSHOT_FILE_NAME: &str = "visualization.png";

/// Fixed settings shared by both front ends.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub window_title: String,
    pub window_size: [f32; 2],
    pub reports_dir: PathBuf,
    /// Pixel size of the PNG written next to the text report.
    pub snapshot_size: (u32, u32),
    /// CSV to load before the first user action.
    pub initial_csv: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Shopping Trends Analyzer".to_string(),
            window_size: [1200.0, 800.0],
            reports_dir: PathBuf::from("reports"),
            snapshot_size: (800, 600),
            initial_csv: None,
        }
    }
}

impl AppConfig {
    /// Builds the config from `std::env::args()`-style input. The only
    /// accepted argument is an optional CSV path.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut config = AppConfig::default();
        match args.len() {
            0 | 1 => {}
            2 => config.initial_csv = Some(PathBuf::from(&args[1])),
            _ => return Err(format!("Usage: {} [sales.csv]", args[0])),
        }
        Ok(config)
    }

    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(REPORT_FILE_NAME)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.reports_dir.join(SNAPSHOT_FILE_NAME)
    }
}

// Sample data covers January 2024, one row per product per day.
pub(crate) const SAMPLE_FIRST_DAY: NaiveDate = match NaiveDate::from_ymd_opt(2024, 1, 1) {
    Some(day) => day,
    None => panic!("2024-01-01 is a valid date"),
};

pub(crate) const SAMPLE_DAYS: u32 = 31;

pub(crate) const SAMPLE_PRODUCTS: [(&str, &str); 5] = [
    ("Laptop", "Electronics"),
    ("Shoes", "Fashion"),
    ("T-shirt", "Fashion"),
    ("Phone", "Electronics"),
    ("Watch", "Accessories"),
];
