use crate::aggregate::{aggregate, AggregatedView, AnalysisMode};
use crate::chart::ChartCanvas;
use crate::config::AppConfig;
use crate::error::{LoadError, WriteError};
use crate::loader::{self, Table};
use crate::report::{self, ReportOutcome};
use log::{info, warn};
use rand::Rng;
use std::fmt;
use std::path::Path;

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NoData,
    DataLoaded,
}

/// Message a front end shows after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Info(String),
    Warning(String),
    Error(String),
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Notice::Info(_) => "Success",
            Notice::Warning(_) => "Warning",
            Notice::Error(_) => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Info(m) | Notice::Warning(m) | Notice::Error(m) => m,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

/// Application state owned by the front end: the current table, the selected
/// analysis and the chart surface.
#[derive(Debug, Default)]
pub struct Session {
    table: Option<Table>,
    selection: Option<AnalysisMode>,
    canvas: ChartCanvas,
    view: Option<AggregatedView>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.table.is_some() {
            SessionState::DataLoaded
        } else {
            SessionState::NoData
        }
    }

    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    pub fn selection(&self) -> Option<AnalysisMode> {
        self.selection
    }

    pub fn canvas(&self) -> &ChartCanvas {
        &self.canvas
    }

    /// View behind the chart currently on the canvas.
    pub fn view(&self) -> Option<&AggregatedView> {
        self.view.as_ref()
    }

    /// Replaces the table with the CSV at `path`. On failure the previous
    /// table and chart stay as they were.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadError> {
        let table = loader::load_from_file(path)?;
        self.replace_table(table);
        Ok(())
    }

    pub fn load_sample(&mut self) {
        self.replace_table(loader::load_sample());
    }

    pub fn load_sample_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.replace_table(loader::load_sample_with(rng));
    }

    /// Installs a table and redraws if an analysis is already selected.
    pub fn replace_table(&mut self, table: Table) {
        info!("Session table replaced ({} rows)", table.len());
        self.table = Some(table);
        self.refresh();
    }

    /// Records the selection; draws it when data is loaded.
    pub fn select_mode(&mut self, mode: AnalysisMode) {
        self.selection = Some(mode);
        self.refresh();
    }

    fn refresh(&mut self) {
        let (Some(table), Some(mode)) = (self.table.as_ref(), self.selection) else {
            return;
        };
        let view = aggregate(table, mode);
        self.canvas.render(&view, mode);
        self.view = Some(view);
    }

    pub fn generate_report(&self, config: &AppConfig) -> Result<ReportOutcome, WriteError> {
        report::write_report(
            self.table.as_ref(),
            &self.canvas,
            &config.reports_dir,
            config.snapshot_size,
        )
    }

    // --- Notice-producing wrappers used by both front ends ---

    pub fn upload(&mut self, path: &Path) -> Notice {
        match self.load_file(path) {
            Ok(()) => Notice::Info("Data loaded successfully!".to_string()),
            Err(e) => {
                warn!("Load of {} failed: {}", path.display(), e);
                Notice::Error(format!("Error loading file: {}", e))
            }
        }
    }

    pub fn sample(&mut self) -> Notice {
        self.load_sample();
        Notice::Info("Sample data loaded successfully!".to_string())
    }

    pub fn report(&self, config: &AppConfig) -> Notice {
        match self.generate_report(config) {
            Ok(ReportOutcome::Written { .. }) => Notice::Info(format!(
                "Report saved in '{}' directory!",
                config.reports_dir.display()
            )),
            Ok(ReportOutcome::NoData) => {
                Notice::Warning("No data to generate report!".to_string())
            }
            Err(e) => Notice::Error(format!("Error generating report: {}", e)),
        }
    }
}
