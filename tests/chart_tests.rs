mod common;

#[cfg(test)]
mod tests {
    use super::common::*;
    use shopping_trends::aggregate::{aggregate, AggregatedView, AnalysisMode};
    use shopping_trends::chart::{build_chart, ChartCanvas, ChartStyle};
    use shopping_trends::loader::Table;

    #[test]
    fn test_style_and_titles_per_mode() {
        let table = two_row_table();
        let cases = [
            (AnalysisMode::SalesOverTime, ChartStyle::Line, "Daily Sales Trend", "Date", "Total Sales ($)"),
            (AnalysisMode::PopularCategories, ChartStyle::Bar, "Sales by Category", "Category", "Total Sales ($)"),
            (AnalysisMode::SpendingPatterns, ChartStyle::Bar, "Price Distribution", "Price Range", "Number of Transactions"),
            (AnalysisMode::PeakHours, ChartStyle::LineWithMarkers, "Sales by Hour of Day", "Hour", "Total Sales ($)"),
        ];
        for (mode, style, title, x, y) in cases {
            let chart = build_chart(&aggregate(&table, mode), mode);
            assert_eq!(chart.style, style);
            assert_eq!(chart.title, title);
            assert_eq!(chart.x_label, x);
            assert_eq!(chart.y_label, y);
        }
    }

    #[test]
    fn test_category_chart_points_follow_view_order() {
        let view = aggregate(&two_row_table(), AnalysisMode::PopularCategories);
        let chart = build_chart(&view, AnalysisMode::PopularCategories);
        assert_eq!(chart.points.len(), 2);
        assert_eq!(chart.points[0].label, "Electronics");
        assert_eq!(chart.points[0].x, 0.0);
        assert_eq!(chart.points[0].value, 1000.0);
        assert_eq!(chart.points[1].label, "Fashion");
        assert_eq!(chart.label_at(1.0), Some("Fashion"));
        assert_eq!(chart.label_at(0.5), None);
    }

    #[test]
    fn test_hour_chart_uses_hour_as_x() {
        let view = AggregatedView::ByHour(vec![(9, 10.0), (18, 13.0)]);
        let chart = build_chart(&view, AnalysisMode::PeakHours);
        let xs: Vec<f64> = chart.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![9.0, 18.0]);
        assert_eq!(chart.x_range(), (8.5, 18.5));
    }

    #[test]
    fn test_render_empty_view_draws_empty_chart() {
        let mut canvas = ChartCanvas::new();
        for mode in AnalysisMode::ALL {
            let view = aggregate(&Table::default(), mode);
            canvas.render(&view, mode);
            let chart = canvas.current().unwrap();
            assert!(chart.is_empty());
            assert_eq!(chart.mode, mode);
            assert_eq!(chart.value_range(), (0.0, 1.0));
            assert_eq!(chart.x_range(), (-0.5, 0.5));
        }
        assert_eq!(canvas.current().unwrap().mode, AnalysisMode::PeakHours);
    }

    #[test]
    fn test_render_replaces_previous_chart() {
        let table = two_row_table();
        let mut canvas = ChartCanvas::new();
        assert!(canvas.current().is_none());

        canvas.render(&aggregate(&table, AnalysisMode::SalesOverTime), AnalysisMode::SalesOverTime);
        canvas.render(&aggregate(&table, AnalysisMode::PeakHours), AnalysisMode::PeakHours);
        assert_eq!(canvas.current().unwrap().mode, AnalysisMode::PeakHours);

        canvas.clear();
        assert!(canvas.current().is_none());
    }

    #[test]
    fn test_value_range_includes_zero() {
        let chart = build_chart(
            &aggregate(&two_row_table(), AnalysisMode::PopularCategories),
            AnalysisMode::PopularCategories,
        );
        let (lo, hi) = chart.value_range();
        assert_eq!(lo, 0.0);
        assert!(hi >= 1000.0);
    }
}
