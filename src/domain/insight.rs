// Aggregated insight domain models: summaries, windowed buckets, comparison and chart series
use super::sensor::{Metric, deserialize_timestamp};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Min/max/mean of one metric. `None` means "no data in range", never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub mean: Option<f64>,
}

impl SummaryStats {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.mean.is_none()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualizedSummary {
    #[serde(default)]
    pub temperature: SummaryStats,
    #[serde(default)]
    pub humidity: SummaryStats,
    #[serde(default)]
    pub air_quality: SummaryStats,
}

impl VisualizedSummary {
    pub fn stats(&self, metric: Metric) -> &SummaryStats {
        match metric {
            Metric::Temperature => &self.temperature,
            Metric::Humidity => &self.humidity,
            Metric::AirQuality => &self.air_quality,
        }
    }
}

/// Statistics of one metric inside an insight bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BucketStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// A single aggregation bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedInsight {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub temperature_min: Option<f64>,
    #[serde(default)]
    pub temperature_max: Option<f64>,
    #[serde(default)]
    pub temperature_mean: Option<f64>,
    #[serde(default)]
    pub temperature_median: Option<f64>,
    #[serde(default)]
    pub humidity_min: Option<f64>,
    #[serde(default)]
    pub humidity_max: Option<f64>,
    #[serde(default)]
    pub humidity_mean: Option<f64>,
    #[serde(default)]
    pub humidity_median: Option<f64>,
    #[serde(default)]
    pub air_quality_min: Option<f64>,
    #[serde(default)]
    pub air_quality_max: Option<f64>,
    #[serde(default)]
    pub air_quality_mean: Option<f64>,
    #[serde(default)]
    pub air_quality_median: Option<f64>,
}

impl AggregatedInsight {
    pub fn stats(&self, metric: Metric) -> BucketStats {
        match metric {
            Metric::Temperature => BucketStats {
                min: self.temperature_min,
                max: self.temperature_max,
                mean: self.temperature_mean,
                median: self.temperature_median,
            },
            Metric::Humidity => BucketStats {
                min: self.humidity_min,
                max: self.humidity_max,
                mean: self.humidity_mean,
                median: self.humidity_median,
            },
            Metric::AirQuality => BucketStats {
                min: self.air_quality_min,
                max: self.air_quality_max,
                mean: self.air_quality_mean,
                median: self.air_quality_median,
            },
        }
    }
}

/// Wire shape of the insight endpoint: a bucket list, or a bare message
/// object when nothing matched the range.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InsightResponse {
    Buckets(Vec<AggregatedInsight>),
    Empty {
        #[allow(dead_code)]
        message: String,
    },
}

impl InsightResponse {
    pub fn into_buckets(self) -> Vec<AggregatedInsight> {
        match self {
            InsightResponse::Buckets(buckets) => buckets,
            InsightResponse::Empty { .. } => Vec::new(),
        }
    }
}

/// Temperature profile of one calendar day, points keyed by hour of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub name: String,
    #[serde(default)]
    pub data: Vec<ComparisonPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub x: u32,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub series: Vec<ChartSeries>,
    #[serde(default)]
    pub anomalies: Vec<AnomalyMarker>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    #[serde(default)]
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub x: NaiveDateTime,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyMarker {
    pub metric: Metric,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub value: Option<f64>,
}

/// Bucket size for aggregated insight, e.g. `10min`, `1h`, `1d`, `1MS`.
/// Accepts an optional positive count followed by a pandas offset alias.
/// Anchored aliases with a suffix (`W-MON`, `QS-JAN`) are not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AggregationWindow(String);

impl AggregationWindow {
    const UNITS: [&'static str; 32] = [
        "ns", "N", "us", "U", "ms", "L", "s", "S", "min", "T", "h", "H", "BH", "d", "D", "B", "C", "W",
        "M", "ME", "MS", "BM", "BME", "BMS", "SM", "SMS", "Q", "QE", "QS", "Y", "YE", "YS",
    ];

    pub fn hourly() -> Self {
        Self("1h".to_string())
    }

    pub fn daily() -> Self {
        Self("1d".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AggregationWindow {
    fn default() -> Self {
        Self::hourly()
    }
}

impl FromStr for AggregationWindow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (count, unit) = s.split_at(split);

        let count_ok = count.is_empty() || count.parse::<u32>().map(|n| n > 0).unwrap_or(false);
        if !count_ok || !Self::UNITS.contains(&unit) {
            anyhow::bail!("invalid aggregation window: {:?}", s);
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for AggregationWindow {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AggregationWindow> for String {
    fn from(window: AggregationWindow) -> Self {
        window.0
    }
}

impl fmt::Display for AggregationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_preserves_nulls() {
        let json = r#"{
            "temperature": {"min": null, "max": null, "mean": null},
            "humidity": {"min": 40.0, "max": 60.0, "mean": 50.12},
            "air_quality": {"min": null, "max": null, "mean": null}
        }"#;
        let summary: VisualizedSummary = serde_json::from_str(json).unwrap();

        assert!(summary.temperature.is_empty());
        assert_eq!(summary.stats(Metric::Humidity).mean, Some(50.12));
        assert_eq!(summary.air_quality.min, None);
    }

    #[test]
    fn test_insight_response_variants() {
        let buckets = r#"[{"timestamp":"2024-05-01T00:00:00","temperature_min":20.0,"temperature_median":null}]"#;
        let parsed: InsightResponse = serde_json::from_str(buckets).unwrap();
        let parsed = parsed.into_buckets();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].stats(Metric::Temperature).min, Some(20.0));
        assert_eq!(parsed[0].stats(Metric::Temperature).median, None);
        assert_eq!(parsed[0].stats(Metric::Humidity), BucketStats::default());

        let empty: InsightResponse = serde_json::from_str(r#"{"message":"No data found"}"#).unwrap();
        assert!(empty.into_buckets().is_empty());
    }

    #[test]
    fn test_comparison_series_shape() {
        let json = r#"[{"name":"2024-05-01","data":[{"x":0,"y":21.5},{"x":1,"y":null}]}]"#;
        let series: Vec<ComparisonSeries> = serde_json::from_str(json).unwrap();
        assert_eq!(series[0].name, "2024-05-01");
        assert_eq!(series[0].data[1], ComparisonPoint { x: 1, y: None });
    }

    #[test]
    fn test_chart_data_defaults_missing_lists() {
        let chart: ChartData = serde_json::from_str("{}").unwrap();
        assert_eq!(chart, ChartData::default());

        let json = r#"{"anomalies":[{"metric":"air_quality","timestamp":"2024-05-01T03:00:00","value":480.0}]}"#;
        let chart: ChartData = serde_json::from_str(json).unwrap();
        assert_eq!(chart.anomalies[0].metric, Metric::AirQuality);
    }

    #[test]
    fn test_aggregation_window_validation() {
        for ok in ["1h", "10min", "1d", "H", "2W", "30s", "500ms", "1M", "1MS", "ME", "1Q", "1Y"] {
            assert!(ok.parse::<AggregationWindow>().is_ok(), "{} should parse", ok);
        }
        for bad in ["", "0h", "hourly", "1x", "h1", "-1h", "1m", "W-MON"] {
            assert!(bad.parse::<AggregationWindow>().is_err(), "{} should fail", bad);
        }
        assert_eq!(AggregationWindow::daily().as_str(), "1d");
    }
}
