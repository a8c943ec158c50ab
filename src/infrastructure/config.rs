use crate::application::sensor_store::ResponseOrdering;
use crate::domain::insight::AggregationWindow;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub store: StoreSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub paths: EndpointPaths,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            paths: EndpointPaths::default(),
        }
    }
}

/// Endpoint paths relative to the base URL. Defaults match the backend that
/// serves the filtered list at `/sensor/processed` and the paginated
/// `{total, data}` listing at `/sensor/visualized`. The older revision
/// (upload at `/sensor/upload`, filtered list at `/sensor/visualized`) needs
/// `upload`, `visualized` and `paginated` overridden together, since one path
/// cannot answer both reading-list shapes.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointPaths {
    pub upload: String,
    pub visualized: String,
    pub summary: String,
    pub paginated: String,
    pub comparison: String,
    pub insight: String,
    pub chart_data: String,
}

impl Default for EndpointPaths {
    fn default() -> Self {
        Self {
            upload: "/sensor/data".to_string(),
            visualized: "/sensor/processed".to_string(),
            summary: "/sensor/aggregated".to_string(),
            paginated: "/sensor/visualized".to_string(),
            comparison: "/sensor/7day-comparison".to_string(),
            insight: "/sensor/aggregated-insight".to_string(),
            chart_data: "/sensor/visualized/chart-data".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StoreSettings {
    pub ordering: ResponseOrdering,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DashboardSettings {
    pub insight_window: AggregationWindow,
    pub page_size: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            insight_window: AggregationWindow::hourly(),
            page_size: 20,
        }
    }
}

/// Load `config/dashboard.{toml,json,yaml}` (optional) with `DASHBOARD__*`
/// environment overrides, e.g. `DASHBOARD__API__BASE_URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}
