mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shopping_trends::aggregate::{AggregatedView, AnalysisMode, CategoryTotal};
    use shopping_trends::config::AppConfig;
    use shopping_trends::session::{Notice, Session, SessionState};
    use std::fs;

    #[test]
    fn test_initial_state_is_no_data() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::NoData);
        assert!(session.table().is_none());
        assert!(session.selection().is_none());
        assert!(session.canvas().current().is_none());
    }

    #[test]
    fn test_upload_then_select_categories() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", TWO_ROW_CSV);

        let mut session = Session::new();
        assert_eq!(
            session.upload(&path),
            Notice::Info("Data loaded successfully!".to_string())
        );
        assert_eq!(session.state(), SessionState::DataLoaded);
        // nothing selected yet
        assert!(session.canvas().current().is_none());

        session.select_mode(AnalysisMode::PopularCategories);
        assert_eq!(
            session.view(),
            Some(&AggregatedView::ByCategory(vec![
                CategoryTotal {
                    category: "Electronics".to_string(),
                    total: 1000.0
                },
                CategoryTotal {
                    category: "Fashion".to_string(),
                    total: 50.0
                },
            ]))
        );
        let chart = session.canvas().current().unwrap();
        assert_eq!(chart.points[0].label, "Electronics");
    }

    #[test]
    fn test_select_before_data_renders_on_load() {
        let mut session = Session::new();
        session.select_mode(AnalysisMode::SalesOverTime);
        assert_eq!(session.state(), SessionState::NoData);
        assert!(session.canvas().current().is_none());

        session.load_sample_with(&mut StdRng::seed_from_u64(2));
        let chart = session.canvas().current().unwrap();
        assert_eq!(chart.mode, AnalysisMode::SalesOverTime);
        assert_eq!(chart.points.len(), 31);
    }

    #[test]
    fn test_reload_rerenders_selected_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(dir.path(), "sales.csv", TWO_ROW_CSV);

        let mut session = Session::new();
        session.load_sample_with(&mut StdRng::seed_from_u64(4));
        session.select_mode(AnalysisMode::PopularCategories);
        assert_eq!(session.canvas().current().unwrap().points.len(), 3);

        session.load_file(&path).unwrap();
        assert_eq!(session.canvas().current().unwrap().points.len(), 2);
        let chart = session.canvas().current().unwrap();
        assert_eq!(chart.mode, AnalysisMode::PopularCategories);
        assert_eq!(chart.points[0].label, "Electronics");
        assert_eq!(chart.points[1].label, "Fashion");
    }

    #[test]
    fn test_failed_load_keeps_dataset_and_chart() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_csv(dir.path(), "sales.csv", TWO_ROW_CSV);
        let bad = write_csv(dir.path(), "bad.csv", "Product,Price\nLaptop,5\n");

        let mut session = Session::new();
        session.load_file(&good).unwrap();
        session.select_mode(AnalysisMode::PopularCategories);

        let notice = session.upload(&bad);
        match notice {
            Notice::Error(msg) => {
                assert!(msg.starts_with("Error loading file:"));
                assert!(msg.contains("Date"));
            }
            other => panic!("expected error notice, got {:?}", other),
        }
        assert_eq!(session.table().unwrap().len(), 2);
        assert_eq!(session.canvas().current().unwrap().points.len(), 2);
    }

    #[test]
    fn test_failed_first_load_stays_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new();
        assert!(session.load_file(dir.path().join("missing.csv")).is_err());
        assert_eq!(session.state(), SessionState::NoData);
    }

    #[test]
    fn test_report_without_data_warns() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            reports_dir: dir.path().join("reports"),
            ..AppConfig::default()
        };
        let session = Session::new();
        assert_eq!(
            session.report(&config),
            Notice::Warning("No data to generate report!".to_string())
        );
        assert!(!config.reports_dir.exists());
    }

    #[test]
    fn test_report_with_data_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            reports_dir: dir.path().join("reports"),
            snapshot_size: (160, 120),
            ..AppConfig::default()
        };
        let mut session = Session::new();
        session.replace_table(two_row_table());

        match session.report(&config) {
            Notice::Info(msg) => assert!(msg.starts_with("Report saved in")),
            other => panic!("expected success, got {:?}", other),
        }
        let text = fs::read_to_string(config.report_path()).unwrap();
        assert!(text.contains("Total Sales: $1,050.00"));
        assert!(text.contains("Total Transactions: 2"));
        assert!(text.contains("Average Transaction Value: $525.00"));
        assert!(config.snapshot_path().exists());
    }

    #[test]
    fn test_config_from_args() {
        let config = AppConfig::from_args(&["app".to_string()]).unwrap();
        assert!(config.initial_csv.is_none());
        assert_eq!(config.reports_dir, std::path::PathBuf::from("reports"));

        let config = AppConfig::from_args(&["app".to_string(), "data.csv".to_string()]).unwrap();
        assert_eq!(config.initial_csv, Some(std::path::PathBuf::from("data.csv")));

        let err = AppConfig::from_args(&["app".to_string(), "a".to_string(), "b".to_string()]);
        assert!(err.is_err());
    }
}
