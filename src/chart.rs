use crate::aggregate::{AggregatedView, AnalysisMode};
use log::debug;

/// How the series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    LineWithMarkers,
    Bar,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub x: f64,
    pub label: String,
    pub value: f64,
}

/// Backend-independent description of what the chart pane shows. The GUI
/// paints it with egui_plot, report snapshots rasterize it with plotters.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub mode: AnalysisMode,
    pub style: ChartStyle,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Label for an x position, if one of the points sits there.
    pub fn label_at(&self, x: f64) -> Option<&str> {
        self.points
            .iter()
            .find(|p| (p.x - x).abs() < 1e-6)
            .map(|p| p.label.as_str())
    }

    /// Bounds for the value axis, always including zero.
    pub fn value_range(&self) -> (f64, f64) {
        let (min, max) = self
            .points
            .iter()
            .fold((0.0_f64, 0.0_f64), |(lo, hi), p| (lo.min(p.value), hi.max(p.value)));
        if max - min <= f64::EPSILON {
            (min, min + 1.0)
        } else {
            (min, max + (max - min) * 0.05)
        }
    }

    /// Bounds for the x axis, padded by half a slot on each side.
    pub fn x_range(&self) -> (f64, f64) {
        if self.points.is_empty() {
            return (-0.5, 0.5);
        }
        let (min, max) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        (min - 0.5, max + 0.5)
    }
}

fn style_for(mode: AnalysisMode) -> ChartStyle {
    match mode {
        AnalysisMode::SalesOverTime => ChartStyle::Line,
        AnalysisMode::PopularCategories | AnalysisMode::SpendingPatterns => ChartStyle::Bar,
        AnalysisMode::PeakHours => ChartStyle::LineWithMarkers,
    }
}

fn titles_for(mode: AnalysisMode) -> (&'static str, &'static str, &'static str) {
    match mode {
        AnalysisMode::SalesOverTime => ("Daily Sales Trend", "Date", "Total Sales ($)"),
        AnalysisMode::PopularCategories => ("Sales by Category", "Category", "Total Sales ($)"),
        AnalysisMode::SpendingPatterns => {
            ("Price Distribution", "Price Range", "Number of Transactions")
        }
        AnalysisMode::PeakHours => ("Sales by Hour of Day", "Hour", "Total Sales ($)"),
    }
}

/// Maps a view to chart points. Hours are placed at their own value on the x
/// axis, every other mode uses consecutive slots.
pub fn build_chart(view: &AggregatedView, mode: AnalysisMode) -> Chart {
    let points = match view {
        AggregatedView::ByHour(hours) => hours
            .iter()
            .map(|(hour, total)| ChartPoint {
                x: *hour as f64,
                label: hour.to_string(),
                value: *total,
            })
            .collect(),
        _ => view
            .entries()
            .into_iter()
            .enumerate()
            .map(|(i, (label, value))| ChartPoint {
                x: i as f64,
                label,
                value,
            })
            .collect(),
    };
    let (title, x_label, y_label) = titles_for(mode);

    Chart {
        mode,
        style: style_for(mode),
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points,
    }
}

/// The single drawing surface shared by the chart pane and the report
/// snapshot. Each render replaces whatever was drawn before.
#[derive(Debug, Clone, Default)]
pub struct ChartCanvas {
    current: Option<Chart>,
}

impl ChartCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, view: &AggregatedView, mode: AnalysisMode) {
        self.clear();
        let chart = build_chart(view, mode);
        debug!("Rendering {:?} chart with {} points", chart.style, chart.points.len());
        self.current = Some(chart);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Chart> {
        self.current.as_ref()
    }
}
