// Filter and query shapes sent to the sensor API
use super::insight::AggregationWindow;
use super::sensor::Metric;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// The user-editable query shape held by the store.
///
/// Empty `start_time`/`end_time` mean "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub start_time: String,
    pub end_time: String,
    pub metrics: BTreeSet<Metric>,
    pub smooth: bool,
    pub anomaly_only: bool,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            start_time: String::new(),
            end_time: String::new(),
            metrics: BTreeSet::new(),
            smooth: true,
            anomaly_only: false,
        }
    }
}

impl FilterParams {
    /// Shallow merge: every field present in `update` replaces the held one.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(start_time) = update.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = update.end_time {
            self.end_time = end_time;
        }
        if let Some(metrics) = update.metrics {
            self.metrics = metrics;
        }
        if let Some(smooth) = update.smooth {
            self.smooth = smooth;
        }
        if let Some(anomaly_only) = update.anomaly_only {
            self.anomaly_only = anomaly_only;
        }
    }

    pub fn time_range(&self) -> TimeRange {
        TimeRange {
            start_time: Some(self.start_time.clone()),
            end_time: Some(self.end_time.clone()),
        }
    }

    /// Held filters with `overrides` laid on top; per-call values win.
    pub fn merged_with(&self, overrides: Option<&VisualizedQuery>) -> VisualizedQuery {
        let held = VisualizedQuery {
            start_time: Some(self.start_time.clone()),
            end_time: Some(self.end_time.clone()),
            metrics: Some(self.metrics.clone()),
            smooth: Some(self.smooth),
            anomaly_only: Some(self.anomaly_only),
        };
        match overrides {
            Some(overrides) => VisualizedQuery {
                start_time: overrides.start_time.clone().or(held.start_time),
                end_time: overrides.end_time.clone().or(held.end_time),
                metrics: overrides.metrics.clone().or(held.metrics),
                smooth: overrides.smooth.or(held.smooth),
                anomaly_only: overrides.anomaly_only.or(held.anomaly_only),
            },
            None => held,
        }
    }
}

/// Partial update for [`FilterParams`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterUpdate {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub metrics: Option<BTreeSet<Metric>>,
    pub smooth: Option<bool>,
    pub anomaly_only: Option<bool>,
}

/// Parameters of the filtered reading list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualizedQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub metrics: Option<BTreeSet<Metric>>,
    pub smooth: Option<bool>,
    pub anomaly_only: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl TimeRange {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
        }
    }

    /// Fill fields this range leaves unset from `fallback`.
    pub fn or(self, fallback: TimeRange) -> TimeRange {
        TimeRange {
            start_time: self.start_time.or(fallback.start_time),
            end_time: self.end_time.or(fallback.end_time),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the paginated reading listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub range: TimeRange,
    pub skip: Option<u32>,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
}

impl PageQuery {
    pub fn page(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightQuery {
    pub window: AggregationWindow,
    pub range: TimeRange,
}

impl InsightQuery {
    pub fn new(window: AggregationWindow) -> Self {
        Self {
            window,
            range: TimeRange::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartQuery {
    pub range: TimeRange,
    pub metrics: Option<BTreeSet<Metric>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_untouched_fields() {
        let mut filters = FilterParams::default();
        filters.apply(FilterUpdate {
            start_time: Some("2024-05-01T00:00:00".to_string()),
            metrics: Some(BTreeSet::from([Metric::Humidity])),
            ..FilterUpdate::default()
        });
        filters.apply(FilterUpdate {
            anomaly_only: Some(true),
            ..FilterUpdate::default()
        });

        assert_eq!(filters.start_time, "2024-05-01T00:00:00");
        assert_eq!(filters.end_time, "");
        assert_eq!(filters.metrics, BTreeSet::from([Metric::Humidity]));
        assert!(filters.smooth);
        assert!(filters.anomaly_only);
    }

    #[test]
    fn test_merged_with_prefers_overrides() {
        let filters = FilterParams {
            start_time: "2024-05-01T00:00:00".to_string(),
            end_time: "2024-05-02T00:00:00".to_string(),
            ..FilterParams::default()
        };
        let overrides = VisualizedQuery {
            end_time: Some("2024-05-03T00:00:00".to_string()),
            smooth: Some(false),
            ..VisualizedQuery::default()
        };

        let merged = filters.merged_with(Some(&overrides));
        assert_eq!(merged.start_time.as_deref(), Some("2024-05-01T00:00:00"));
        assert_eq!(merged.end_time.as_deref(), Some("2024-05-03T00:00:00"));
        assert_eq!(merged.smooth, Some(false));
        assert_eq!(merged.anomaly_only, Some(false));

        assert_eq!(filters.merged_with(None).smooth, Some(true));
    }

    #[test]
    fn test_time_range_fallback() {
        let held = TimeRange::new("a", "b");
        let range = TimeRange {
            start_time: Some("c".to_string()),
            end_time: None,
        }
        .or(held);
        assert_eq!(range, TimeRange::new("c", "b"));
    }
}
