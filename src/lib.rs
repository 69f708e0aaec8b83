pub mod aggregate;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod session;
pub mod snapshot;

// Command handling for the shell front end, exported for tests
#[cfg(feature = "cli_app")]
pub mod cli_app {
    use crate::aggregate::AnalysisMode;
    use crate::chart::{Chart, ChartStyle};
    use crate::config::AppConfig;
    use crate::session::{Notice, Session, SessionState};
    use std::path::Path;

    const BAR_WIDTH: usize = 40;

    pub const HELP: &str = "\
Commands:
  load <path>     load a sales CSV
  sample          load the January 2024 sample data
  mode <1-4>      1 Total Sales Over Time, 2 Popular Categories,
                  3 Customer Spending Patterns, 4 Peak Shopping Hours
  show            print the current chart
  report          write the report into the reports directory
  status          show what is loaded and selected
  help            this text
  q               quit";

    /// Prints a chart as a labelled horizontal bar listing.
    pub fn chart_to_text(chart: &Chart) -> String {
        let kind = match chart.style {
            ChartStyle::Line => "line",
            ChartStyle::LineWithMarkers => "line + markers",
            ChartStyle::Bar => "bar",
        };
        let mut out = format!(
            "{} ({})\n{} vs {}\n",
            chart.title, kind, chart.y_label, chart.x_label
        );
        if chart.is_empty() {
            out.push_str("(no data)\n");
            return out;
        }

        let label_width = chart.points.iter().map(|p| p.label.chars().count()).max().unwrap_or(0);
        let peak = chart.points.iter().fold(0.0_f64, |m, p| m.max(p.value.abs()));
        for p in &chart.points {
            let len = if peak > 0.0 {
                ((p.value.abs() / peak) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            out.push_str(&format!(
                "{:<lw$} | {:<bw$} {:.2}\n",
                p.label,
                "#".repeat(len),
                p.value,
                lw = label_width,
                bw = BAR_WIDTH
            ));
        }
        out
    }

    fn status_text(session: &Session) -> String {
        let data = match (session.state(), session.table()) {
            (SessionState::DataLoaded, Some(table)) => format!("{} rows loaded", table.len()),
            _ => "no data".to_string(),
        };
        let mode = session
            .selection()
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| "none".to_string());
        format!("{}; analysis: {}", data, mode)
    }

    fn apply_notice(notice: Notice, status_msg: &mut String) -> Option<String> {
        *status_msg = match &notice {
            Notice::Info(_) => "ok".to_string(),
            Notice::Warning(_) => "warning".to_string(),
            Notice::Error(_) => "error".to_string(),
        };
        Some(notice.to_string())
    }

    /// Runs one shell command against the session. Returns text to print, and
    /// leaves a short status in `status_msg`.
    pub fn process_command(
        session: &mut Session,
        config: &AppConfig,
        cmd: &str,
        status_msg: &mut String,
    ) -> Option<String> {
        let cmd = cmd.trim();
        let (word, rest) = match cmd.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (cmd, ""),
        };

        match word {
            "load" => {
                if rest.is_empty() {
                    *status_msg = "Usage: load <path>".to_string();
                    return None;
                }
                let notice = session.upload(Path::new(rest));
                let mut out = apply_notice(notice, status_msg);
                if let (Some(text), Some(chart)) = (out.as_mut(), session.canvas().current()) {
                    text.push('\n');
                    text.push_str(&chart_to_text(chart));
                }
                out
            }
            "sample" => {
                let notice = session.sample();
                let mut out = apply_notice(notice, status_msg);
                if let (Some(text), Some(chart)) = (out.as_mut(), session.canvas().current()) {
                    text.push('\n');
                    text.push_str(&chart_to_text(chart));
                }
                out
            }
            "mode" => match AnalysisMode::parse(rest) {
                Some(mode) => {
                    session.select_mode(mode);
                    *status_msg = "ok".to_string();
                    match session.state() {
                        SessionState::DataLoaded => session.canvas().current().map(chart_to_text),
                        SessionState::NoData => {
                            Some(format!("Selected {}; load data to draw it.", mode.label()))
                        }
                    }
                }
                None => {
                    *status_msg = "Invalid mode".to_string();
                    None
                }
            },
            "show" => match session.canvas().current() {
                Some(chart) => {
                    *status_msg = "ok".to_string();
                    Some(chart_to_text(chart))
                }
                None => {
                    *status_msg = "Nothing to show".to_string();
                    None
                }
            },
            "report" => {
                let notice = session.report(config);
                apply_notice(notice, status_msg)
            }
            "status" => {
                *status_msg = "ok".to_string();
                Some(status_text(session))
            }
            "help" => {
                *status_msg = "ok".to_string();
                Some(HELP.to_string())
            }
            _ => {
                *status_msg = "unrecognized cmd".to_string();
                None
            }
        }
    }
}
