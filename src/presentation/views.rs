// Plain-text views over store snapshots
use crate::application::sensor_store::SensorState;
use crate::domain::insight::SummaryStats;
use crate::domain::sensor::{Metric, VisualizedSensorData};
use crate::presentation::router::Route;
use std::fmt::Write;

fn value(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn status_line(out: &mut String, state: &SensorState) {
    if state.loading {
        out.push_str("Loading...\n");
    }
    if let Some(error) = &state.error {
        let _ = writeln!(out, "Error: {}", error);
    }
}

fn reading_line(out: &mut String, reading: &VisualizedSensorData) {
    let _ = write!(out, "{}", reading.timestamp.format("%Y-%m-%d %H:%M"));
    for metric in Metric::ALL {
        let flag = if reading.is_anomaly(metric) { "!" } else { "" };
        let _ = write!(
            out,
            "  {}={}{} (~{})",
            metric,
            value(reading.raw(metric)),
            flag,
            value(reading.smooth(metric))
        );
    }
    out.push('\n');
}

pub fn render_home(routes: &[Route]) -> String {
    let mut out = String::from("IoT sensor dashboard\n\nPages:\n");
    for route in routes {
        let _ = writeln!(out, "  {}", route);
    }
    out
}

/// Reading list with anomalies marked by `!` and smoothed values in parentheses.
pub fn render_sensor(state: &SensorState) -> String {
    let mut out = String::from("Sensor readings\n");
    status_line(&mut out, state);

    let filters = &state.filter_params;
    if !filters.start_time.is_empty() || !filters.end_time.is_empty() {
        let _ = writeln!(out, "Range: {} .. {}", filters.start_time, filters.end_time);
    }

    if state.visualized_data.is_empty() {
        out.push_str("No readings.\n");
        return out;
    }

    let anomalies = state.visualized_data.iter().filter(|r| r.has_anomaly()).count();
    let _ = writeln!(
        out,
        "{} readings, {} with anomalies",
        state.visualized_data.len(),
        anomalies
    );
    for reading in &state.visualized_data {
        reading_line(&mut out, reading);
    }
    out
}

fn summary_row(out: &mut String, metric: Metric, stats: &SummaryStats) {
    let _ = writeln!(
        out,
        "  {:<12} min {:>8}  max {:>8}  mean {:>8}",
        metric,
        value(stats.min),
        value(stats.max),
        value(stats.mean)
    );
}

pub fn render_dashboard(state: &SensorState) -> String {
    let mut out = String::from("Sensor dashboard\n");
    status_line(&mut out, state);

    out.push_str("\nSummary\n");
    match &state.summary {
        Some(summary) => {
            for metric in Metric::ALL {
                summary_row(&mut out, metric, summary.stats(metric));
            }
        }
        None => out.push_str("  no summary\n"),
    }

    out.push_str("\nAggregated insight\n");
    if state.insights.is_empty() {
        out.push_str("  no data\n");
    }
    for bucket in &state.insights {
        let _ = write!(out, "  {}", bucket.timestamp.format("%Y-%m-%d %H:%M"));
        for metric in Metric::ALL {
            let stats = bucket.stats(metric);
            let _ = write!(out, "  {} {}/{}", metric, value(stats.mean), value(stats.median));
        }
        out.push('\n');
    }

    out.push_str("\n7-day temperature comparison\n");
    for day in &state.comparison {
        let values: Vec<f64> = day.data.iter().filter_map(|p| p.y).collect();
        let mean = if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        };
        let _ = writeln!(out, "  {}  {} hours  mean {}", day.name, day.data.len(), value(mean));
    }

    if let Some(chart) = &state.chart_data {
        let _ = writeln!(
            out,
            "\nChart: {} series, {} anomaly markers",
            chart.series.len(),
            chart.anomalies.len()
        );
        for marker in &chart.anomalies {
            let _ = writeln!(
                out,
                "  ! {} {} {}",
                marker.timestamp.format("%Y-%m-%d %H:%M"),
                marker.metric,
                value(marker.value)
            );
        }
    }

    if let Some(page) = &state.page {
        let _ = writeln!(out, "\nLatest readings ({} of {})", page.data.len(), page.total);
        for reading in &page.data {
            reading_line(&mut out, reading);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::insight::VisualizedSummary;
    use crate::domain::sensor::parse_timestamp;
    use crate::presentation::router::ROUTES;

    fn reading(humidity_anomaly: bool) -> VisualizedSensorData {
        VisualizedSensorData {
            id: Some(1),
            timestamp: parse_timestamp("2024-05-01T10:00:00").unwrap(),
            temperature: Some(21.456),
            humidity: Some(55.0),
            air_quality: None,
            temperature_smooth: Some(21.0),
            humidity_smooth: None,
            air_quality_smooth: None,
            temperature_anomaly: Some(false),
            humidity_anomaly: Some(humidity_anomaly),
            air_quality_anomaly: None,
        }
    }

    #[test]
    fn test_home_lists_routes() {
        let out = render_home(ROUTES);
        assert!(out.contains("/sensor-dashboard"));
    }

    #[test]
    fn test_sensor_view_marks_anomalies() {
        let state = SensorState {
            visualized_data: vec![reading(true), reading(false)],
            ..SensorState::default()
        };
        let out = render_sensor(&state);

        assert!(out.contains("2 readings, 1 with anomalies"));
        assert!(out.contains("temperature=21.46 (~21.00)"));
        assert!(out.contains("humidity=55.00!"));
        assert!(out.contains("air_quality=- (~-)"));
    }

    #[test]
    fn test_error_and_empty_states() {
        let state = SensorState {
            error: Some("Network Error".to_string()),
            ..SensorState::default()
        };
        let out = render_sensor(&state);
        assert!(out.contains("Error: Network Error"));
        assert!(out.contains("No readings."));

        let out = render_dashboard(&state);
        assert!(out.contains("no summary"));
    }

    #[test]
    fn test_dashboard_shows_missing_stats_as_dash() {
        let state = SensorState {
            summary: Some(VisualizedSummary::default()),
            ..SensorState::default()
        };
        let out = render_dashboard(&state);
        let line = out
            .lines()
            .find(|l| l.trim_start().starts_with("temperature"))
            .unwrap();
        assert!(line.ends_with(" -"));
        assert!(!line.contains("0.00"));
    }
}
