use shopping_trends::config::AppConfig;
use shopping_trends::session::Session;

#[cfg(feature = "cli_app")]
mod cli_app {
    use super::*;
    use shopping_trends::cli_app::process_command;
    use std::env;
    use std::io::{self, Write};
    use std::time::Instant;

    fn prompt(interactive: bool, elapsed_time: f64, status_msg: &str) {
        if interactive {
            print!("[{:.1}] ({}) > ", elapsed_time, status_msg);
            let _ = io::stdout().flush();
        }
    }

    pub fn main() {
        let args: Vec<String> = env::args().collect();
        let config = match AppConfig::from_args(&args) {
            Ok(config) => config,
            Err(usage) => {
                eprintln!("{}", usage);
                return;
            }
        };

        let mut session = Session::new();
        let mut status_msg = String::from("ok");
        let mut elapsed_time = 0.0;
        let interactive = atty::is(atty::Stream::Stdin);

        println!("{}. Type 'help' for commands.", config.window_title);
        if let Some(path) = &config.initial_csv {
            println!("{}", session.upload(path));
        }
        prompt(interactive, elapsed_time, &status_msg);

        let mut line = String::new();
        loop {
            line.clear();
            // EOF or a broken stdin ends the session
            let bytes = io::stdin().read_line(&mut line).unwrap_or(0);
            if bytes == 0 {
                break;
            }

            let cmd = line.trim();
            if cmd == "q" || cmd == "quit" {
                break;
            }
            if cmd.is_empty() {
                prompt(interactive, elapsed_time, &status_msg);
                continue;
            }

            let start = Instant::now();
            let output = process_command(&mut session, &config, cmd, &mut status_msg);
            elapsed_time = start.elapsed().as_secs_f64();

            if let Some(text) = output {
                println!("{}", text.trim_end());
            }
            prompt(interactive, elapsed_time, &status_msg);
        }
    }
}

#[cfg(feature = "gui_app")]
mod gui_app {
    use super::*;
    use eframe::egui;
    use egui_extras::{Column, TableBuilder};
    use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};
    use shopping_trends::aggregate::AnalysisMode;
    use shopping_trends::chart::{Chart, ChartStyle};
    use shopping_trends::session::Notice;

    const SERIES_COLOR: egui::Color32 = egui::Color32::from_rgb(100, 143, 255);

    fn show_notice(notice: &Notice) {
        let level = match notice {
            Notice::Info(_) => rfd::MessageLevel::Info,
            Notice::Warning(_) => rfd::MessageLevel::Warning,
            Notice::Error(_) => rfd::MessageLevel::Error,
        };
        let _ = rfd::MessageDialog::new()
            .set_level(level)
            .set_title(notice.title())
            .set_description(notice.message())
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }

    struct AnalyzerApp {
        session: Session,
        config: AppConfig,
    }

    impl AnalyzerApp {
        fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            let mut session = Session::new();
            if let Some(path) = &config.initial_csv {
                show_notice(&session.upload(path));
            }
            Self { session, config }
        }

        fn upload_section(&mut self, ui: &mut egui::Ui) {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Data Upload").strong());
                ui.horizontal(|ui| {
                    if ui.button("Upload CSV").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("CSV files", &["csv"])
                            .pick_file()
                        {
                            show_notice(&self.session.upload(&path));
                        }
                    }
                    if ui.button("Load Sample Data").clicked() {
                        show_notice(&self.session.sample());
                    }
                });
            });
        }

        fn analysis_section(&mut self, ui: &mut egui::Ui) {
            ui.group(|ui| {
                ui.label(egui::RichText::new("Analysis Options").strong());
                for mode in AnalysisMode::ALL {
                    let checked = self.session.selection() == Some(mode);
                    if ui.radio(checked, mode.label()).clicked() {
                        self.session.select_mode(mode);
                    }
                }
            });
        }

        fn view_table(&self, ui: &mut egui::Ui) {
            let Some(view) = self.session.view() else {
                return;
            };
            let entries = view.entries();
            TableBuilder::new(ui)
                .striped(true)
                .column(Column::initial(200.0).at_least(80.0))
                .column(Column::remainder())
                .header(20.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Key");
                    });
                    header.col(|ui| {
                        ui.strong("Value");
                    });
                })
                .body(|body| {
                    body.rows(18.0, entries.len(), |mut row| {
                        let (key, value) = &entries[row.index()];
                        row.col(|ui| {
                            ui.label(key);
                        });
                        row.col(|ui| {
                            ui.label(format!("{:.2}", value));
                        });
                    });
                });
        }
    }

    fn paint_chart(ui: &mut egui::Ui, chart: Option<&Chart>, height: f32) {
        let mut plot = Plot::new("analysis_plot")
            .legend(Legend::default())
            .height(height)
            .auto_bounds_y();

        if let Some(chart) = chart {
            ui.heading(&chart.title);
            let for_axis = chart.clone();
            plot = plot
                .x_axis_label(chart.x_label.clone())
                .y_axis_label(chart.y_label.clone())
                .x_axis_formatter(move |grid_mark, _max_chars, _range| {
                    for_axis
                        .label_at(grid_mark.value)
                        .map(str::to_string)
                        .unwrap_or_default()
                });
        }

        plot.show(ui, |plot_ui| {
            let Some(chart) = chart else {
                return;
            };
            let coords: Vec<[f64; 2]> = chart.points.iter().map(|p| [p.x, p.value]).collect();
            match chart.style {
                ChartStyle::Line => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(coords))
                            .color(SERIES_COLOR)
                            .name(&chart.title),
                    );
                }
                ChartStyle::LineWithMarkers => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(coords.clone()))
                            .color(SERIES_COLOR)
                            .name(&chart.title),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(coords))
                            .radius(4.0)
                            .color(SERIES_COLOR),
                    );
                }
                ChartStyle::Bar => {
                    let bars: Vec<Bar> = chart
                        .points
                        .iter()
                        .map(|p| {
                            Bar::new(p.x, p.value)
                                .width(0.8)
                                .name(format!("{}: {:.2}", p.label, p.value))
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(SERIES_COLOR).name(&chart.title));
                }
            }
        });
    }

    impl eframe::App for AnalyzerApp {
        fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
            egui::SidePanel::left("controls")
                .resizable(false)
                .default_width(260.0)
                .show(ctx, |ui| {
                    self.upload_section(ui);
                    ui.add_space(8.0);
                    self.analysis_section(ui);
                    ui.add_space(8.0);
                    if ui.button("Generate Report").clicked() {
                        show_notice(&self.session.report(&self.config));
                    }
                });

            egui::CentralPanel::default().show(ctx, |ui| {
                ui.label(egui::RichText::new("Visualization").strong());
                let height = ui.available_height() * 0.7;
                paint_chart(ui, self.session.canvas().current(), height);
                ui.separator();
                self.view_table(ui);
            });
        }
    }

    pub fn main() -> Result<(), eframe::Error> {
        let args: Vec<String> = std::env::args().collect();
        let config = AppConfig::from_args(&args).unwrap_or_else(|usage| {
            eprintln!("{}", usage);
            AppConfig::default()
        });

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(config.window_size)
                .with_title(config.window_title.clone()),
            ..Default::default()
        };

        let title = config.window_title.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |cc| Box::new(AnalyzerApp::new(cc, config))),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(all(feature = "cli_app", feature = "gui_app"))]
    compile_error!(
        "Features 'cli_app' and 'gui_app' are mutually exclusive. Please enable only one."
    );

    env_logger::init();

    #[cfg(feature = "cli_app")]
    {
        cli_app::main();
        Ok(())
    }

    #[cfg(feature = "gui_app")]
    {
        gui_app::main().map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
    }

    #[cfg(not(any(feature = "cli_app", feature = "gui_app")))]
    {
        eprintln!("Error: No application feature ('cli_app' or 'gui_app') enabled.");
        eprintln!("Build with --features cli_app or --features gui_app");
        std::process::exit(1);
    }
}
