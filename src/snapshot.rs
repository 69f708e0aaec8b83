use crate::chart::{Chart, ChartCanvas, ChartStyle};
use crate::error::WriteError;
use log::debug;
use plotters::prelude::*;
use std::path::Path;

const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);
const MAX_X_LABELS: usize = 16;

fn snapshot_err<E: std::fmt::Debug>(e: E) -> WriteError {
    WriteError::Snapshot(format!("{:?}", e))
}

/// Writes the canvas to a PNG file. A canvas with nothing drawn yields a
/// blank white image.
pub fn save_png(canvas: &ChartCanvas, path: &Path, size: (u32, u32)) -> Result<(), WriteError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(snapshot_err)?;

    if let Some(chart) = canvas.current() {
        draw_chart(&root, chart)?;
    }

    root.present().map_err(snapshot_err)?;
    debug!("Snapshot written to {}", path.display());
    Ok(())
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    chart: &Chart,
) -> Result<(), WriteError> {
    let (x_lo, x_hi) = chart.x_range();
    let (y_lo, y_hi) = chart.value_range();

    let mut ctx = ChartBuilder::on(root)
        .caption(chart.title.as_str(), ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
        .map_err(snapshot_err)?;

    let formatter = |x: &f64| chart.label_at(*x).map(str::to_string).unwrap_or_default();
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(chart.points.len().clamp(1, MAX_X_LABELS))
        .x_label_formatter(&formatter)
        .x_desc(chart.x_label.clone())
        .y_desc(chart.y_label.clone())
        .draw()
        .map_err(snapshot_err)?;

    let coords = chart.points.iter().map(|p| (p.x, p.value));
    match chart.style {
        ChartStyle::Line => {
            ctx.draw_series(LineSeries::new(coords, &SERIES_COLOR))
                .map_err(snapshot_err)?;
        }
        ChartStyle::LineWithMarkers => {
            ctx.draw_series(LineSeries::new(coords, &SERIES_COLOR))
                .map_err(snapshot_err)?;
            ctx.draw_series(
                chart
                    .points
                    .iter()
                    .map(|p| Circle::new((p.x, p.value), 4, SERIES_COLOR.filled())),
            )
            .map_err(snapshot_err)?;
        }
        ChartStyle::Bar => {
            ctx.draw_series(chart.points.iter().map(|p| {
                Rectangle::new(
                    [(p.x - 0.4, 0.0), (p.x + 0.4, p.value)],
                    SERIES_COLOR.mix(0.85).filled(),
                )
            }))
            .map_err(snapshot_err)?;
        }
    }
    Ok(())
}
