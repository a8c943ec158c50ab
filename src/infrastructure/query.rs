// Query string building for the sensor API
use crate::domain::filter::{ChartQuery, InsightQuery, PageQuery, TimeRange, VisualizedQuery};
use crate::domain::sensor::Metric;
use std::collections::BTreeSet;

/// Ordered query pairs. Unset values and empty strings never make it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key.to_string(), value));
        }
        self
    }

    pub fn push_opt(&mut self, key: &str, value: Option<impl ToString>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Lists go out as repeated keys: `metrics=a&metrics=b`.
    pub fn push_metrics(&mut self, key: &str, metrics: Option<&BTreeSet<Metric>>) -> &mut Self {
        for metric in metrics.into_iter().flatten() {
            self.push(key, metric);
        }
        self
    }

    fn push_range(&mut self, range: &TimeRange) -> &mut Self {
        self.push_opt("start_time", range.start_time.as_deref())
            .push_opt("end_time", range.end_time.as_deref())
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl From<&VisualizedQuery> for QueryParams {
    fn from(query: &VisualizedQuery) -> Self {
        let mut params = QueryParams::new();
        params
            .push_opt("start_time", query.start_time.as_deref())
            .push_opt("end_time", query.end_time.as_deref())
            .push_metrics("metrics", query.metrics.as_ref())
            .push_opt("smooth", query.smooth)
            .push_opt("anomaly_only", query.anomaly_only);
        params
    }
}

impl From<&TimeRange> for QueryParams {
    fn from(range: &TimeRange) -> Self {
        let mut params = QueryParams::new();
        params.push_range(range);
        params
    }
}

impl From<&PageQuery> for QueryParams {
    fn from(query: &PageQuery) -> Self {
        let mut params = QueryParams::new();
        params
            .push_range(&query.range)
            .push_opt("skip", query.skip)
            .push_opt("limit", query.limit)
            .push_opt("order", query.order);
        params
    }
}

impl From<&InsightQuery> for QueryParams {
    fn from(query: &InsightQuery) -> Self {
        let mut params = QueryParams::new();
        params.push("window", &query.window).push_range(&query.range);
        params
    }
}

impl From<&ChartQuery> for QueryParams {
    fn from(query: &ChartQuery) -> Self {
        let mut params = QueryParams::new();
        params
            .push_range(&query.range)
            .push_metrics("metrics", query.metrics.as_ref());
        params
    }
}

/// Join base URL, path and query into a request URL.
pub fn build_url(base_url: &str, path: &str, params: &QueryParams) -> String {
    let mut url = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.to_query_string());
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{FilterParams, SortOrder};
    use crate::domain::insight::AggregationWindow;

    #[test]
    fn test_default_filters_strip_empty_values() {
        let query = FilterParams::default().merged_with(None);
        let params = QueryParams::from(&query);

        assert_eq!(params.to_query_string(), "smooth=true&anomaly_only=false");
        assert!(params.pairs().iter().all(|(_, v)| !v.is_empty()));
    }

    #[test]
    fn test_no_pair_is_ever_empty() {
        let queries = [
            VisualizedQuery::default(),
            VisualizedQuery {
                start_time: Some(String::new()),
                end_time: Some("2024-05-02T00:00:00".to_string()),
                metrics: Some(BTreeSet::new()),
                smooth: None,
                anomaly_only: Some(true),
            },
            VisualizedQuery {
                start_time: Some(String::new()),
                end_time: Some(String::new()),
                metrics: None,
                smooth: Some(false),
                anomaly_only: None,
            },
        ];

        for query in &queries {
            let params = QueryParams::from(query);
            assert!(
                params.pairs().iter().all(|(_, v)| !v.is_empty()),
                "empty value leaked for {:?}",
                query
            );
        }
        assert!(QueryParams::from(&queries[0]).is_empty());
    }

    #[test]
    fn test_metrics_repeat_the_key() {
        let query = VisualizedQuery {
            metrics: Some(BTreeSet::from([Metric::AirQuality, Metric::Temperature])),
            ..VisualizedQuery::default()
        };
        assert_eq!(
            QueryParams::from(&query).to_query_string(),
            "metrics=temperature&metrics=air_quality"
        );
    }

    #[test]
    fn test_page_and_insight_params() {
        let page = PageQuery {
            range: TimeRange::new("2024-05-01T10:00:00", ""),
            skip: Some(10),
            limit: Some(5),
            order: Some(SortOrder::Desc),
        };
        assert_eq!(
            QueryParams::from(&page).to_query_string(),
            "start_time=2024-05-01T10%3A00%3A00&skip=10&limit=5&order=desc"
        );

        let insight = InsightQuery::new(AggregationWindow::hourly());
        assert_eq!(QueryParams::from(&insight).to_query_string(), "window=1h");
    }

    #[test]
    fn test_build_url() {
        let mut params = QueryParams::new();
        params.push("window", "1d");

        assert_eq!(
            build_url("http://localhost:8000/", "/sensor/aggregated-insight", &params),
            "http://localhost:8000/sensor/aggregated-insight?window=1d"
        );
        assert_eq!(
            build_url("http://localhost:8000/api", "sensor/7day-comparison", &QueryParams::new()),
            "http://localhost:8000/api/sensor/7day-comparison"
        );
    }
}
