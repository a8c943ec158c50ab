// Command line arguments
use crate::domain::filter::FilterUpdate;
use crate::domain::sensor::Metric;
use clap::Parser;
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "IoT sensor dashboard client", long_about = None)]
pub struct Args {
    /// Page to open: /, /sensor or /sensor-dashboard
    #[arg(default_value = "/")]
    pub path: String,

    /// CSV file to upload before listing readings (sensor page)
    #[arg(short, long)]
    pub upload: Option<PathBuf>,

    /// Range start, ISO-8601
    #[arg(long)]
    pub from: Option<String>,

    /// Range end, ISO-8601
    #[arg(long)]
    pub to: Option<String>,

    /// Comma separated metrics to include
    #[arg(short, long, value_delimiter = ',')]
    pub metrics: Vec<Metric>,

    /// Only readings flagged as anomalies
    #[arg(long)]
    pub anomaly_only: bool,

    /// Hide smoothed values
    #[arg(long)]
    pub raw: bool,
}

impl Args {
    /// Filter changes requested on the command line. Flags left out do not
    /// touch the held filters.
    pub fn filter_update(&self) -> FilterUpdate {
        FilterUpdate {
            start_time: self.from.clone(),
            end_time: self.to.clone(),
            metrics: (!self.metrics.is_empty())
                .then(|| self.metrics.iter().copied().collect::<BTreeSet<_>>()),
            smooth: self.raw.then_some(false),
            anomaly_only: self.anomaly_only.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sensor-dashboard"]).unwrap();
        assert_eq!(args.path, "/");
        assert_eq!(args.filter_update(), FilterUpdate::default());
    }

    #[test]
    fn test_filters_from_flags() {
        let args = Args::try_parse_from([
            "sensor-dashboard",
            "/sensor",
            "--from",
            "2024-05-01T00:00:00",
            "--metrics",
            "humidity,air_quality",
            "--anomaly-only",
            "--raw",
        ])
        .unwrap();

        let update = args.filter_update();
        assert_eq!(update.start_time.as_deref(), Some("2024-05-01T00:00:00"));
        assert_eq!(update.end_time, None);
        assert_eq!(
            update.metrics,
            Some(BTreeSet::from([Metric::Humidity, Metric::AirQuality]))
        );
        assert_eq!(update.smooth, Some(false));
        assert_eq!(update.anomaly_only, Some(true));
    }

    #[test]
    fn test_unknown_metric_is_rejected() {
        assert!(Args::try_parse_from(["sensor-dashboard", "-m", "pressure"]).is_err());
    }
}
