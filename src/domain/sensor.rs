// Sensor reading domain models
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three metrics every reading carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    AirQuality,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::AirQuality];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Temperature => "temperature",
            Metric::Humidity => "humidity",
            Metric::AirQuality => "air_quality",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "temperature" => Ok(Metric::Temperature),
            "humidity" => Ok(Metric::Humidity),
            "air_quality" => Ok(Metric::AirQuality),
            other => anyhow::bail!("unknown metric: {}", other),
        }
    }
}

/// A processed reading as served by the API.
///
/// The filtered endpoint drops keys for metrics excluded by the request
/// (and never sends `id`), so everything except the timestamp is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizedSensorData {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: NaiveDateTime,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub air_quality: Option<f64>,
    #[serde(default)]
    pub temperature_smooth: Option<f64>,
    #[serde(default)]
    pub humidity_smooth: Option<f64>,
    #[serde(default)]
    pub air_quality_smooth: Option<f64>,
    #[serde(default)]
    pub temperature_anomaly: Option<bool>,
    #[serde(default)]
    pub humidity_anomaly: Option<bool>,
    #[serde(default)]
    pub air_quality_anomaly: Option<bool>,
}

impl VisualizedSensorData {
    pub fn raw(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::AirQuality => self.air_quality,
        }
    }

    pub fn smooth(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature_smooth,
            Metric::Humidity => self.humidity_smooth,
            Metric::AirQuality => self.air_quality_smooth,
        }
    }

    pub fn is_anomaly(&self, metric: Metric) -> bool {
        let flag = match metric {
            Metric::Temperature => self.temperature_anomaly,
            Metric::Humidity => self.humidity_anomaly,
            Metric::AirQuality => self.air_quality_anomaly,
        };
        flag.unwrap_or(false)
    }

    pub fn has_anomaly(&self) -> bool {
        Metric::ALL.iter().any(|m| self.is_anomaly(*m))
    }
}

/// One page of the paginated reading listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizedPage {
    pub total: u64,
    #[serde(default)]
    pub data: Vec<VisualizedSensorData>,
}

/// Parse an API timestamp. The backend emits naive ISO-8601 datetimes, but
/// RFC 3339 with an offset is accepted too and converted to UTC.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Some(time.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

pub(crate) fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}
