// Sensor store - Owns the last fetched results and the loading/error lifecycle around each API call
use crate::application::sensor_api::SensorApi;
use crate::domain::filter::{
    ChartQuery, FilterParams, FilterUpdate, InsightQuery, PageQuery, TimeRange, VisualizedQuery,
};
use crate::domain::insight::{AggregatedInsight, ChartData, ComparisonSeries, VisualizedSummary};
use crate::domain::sensor::{VisualizedPage, VisualizedSensorData};
use crate::domain::upload::CsvUpload;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;

/// Snapshot of everything the store holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorState {
    pub visualized_data: Vec<VisualizedSensorData>,
    pub summary: Option<VisualizedSummary>,
    pub page: Option<VisualizedPage>,
    pub comparison: Vec<ComparisonSeries>,
    pub insights: Vec<AggregatedInsight>,
    pub chart_data: Option<ChartData>,
    pub loading: bool,
    pub error: Option<String>,
    pub filter_params: FilterParams,
}

/// Which response wins when calls of the same action overlap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOrdering {
    /// Whichever response arrives last replaces the held data.
    #[default]
    LastResolved,
    /// Responses older than the last applied one are dropped.
    LatestIssued,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    VisualizedData,
    Summary,
    Page,
    Comparison,
    Insight,
    ChartData,
}

const ACTION_COUNT: usize = 6;

/// Per-action request numbering for [`ResponseOrdering::LatestIssued`].
struct Sequencer {
    ordering: ResponseOrdering,
    issued: [AtomicU64; ACTION_COUNT],
    applied: [AtomicU64; ACTION_COUNT],
}

impl Sequencer {
    fn new(ordering: ResponseOrdering) -> Self {
        Self {
            ordering,
            issued: std::array::from_fn(|_| AtomicU64::new(0)),
            applied: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }

    fn issue(&self, action: Action) -> u64 {
        self.issued[action as usize].fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether the response for `ticket` may be applied.
    fn accept(&self, action: Action, ticket: u64) -> bool {
        match self.ordering {
            ResponseOrdering::LastResolved => true,
            ResponseOrdering::LatestIssued => {
                self.applied[action as usize].fetch_max(ticket, Ordering::SeqCst) < ticket
            }
        }
    }
}

/// State container for the sensor pages.
///
/// Views read snapshots through [`SensorStore::state`] or watch for changes
/// through [`SensorStore::subscribe`]; only the actions below mutate state.
pub struct SensorStore {
    api: Arc<dyn SensorApi>,
    state: watch::Sender<SensorState>,
    sequencer: Sequencer,
}

impl SensorStore {
    pub fn new(api: Arc<dyn SensorApi>) -> Self {
        Self::with_ordering(api, ResponseOrdering::default())
    }

    pub fn with_ordering(api: Arc<dyn SensorApi>, ordering: ResponseOrdering) -> Self {
        let (state, _) = watch::channel(SensorState::default());
        Self {
            api,
            state,
            sequencer: Sequencer::new(ordering),
        }
    }

    pub fn state(&self) -> SensorState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SensorState> {
        self.state.subscribe()
    }

    pub fn filter_params(&self) -> FilterParams {
        self.state.borrow().filter_params.clone()
    }

    pub fn set_filters(&self, update: FilterUpdate) {
        self.state.send_modify(|state| state.filter_params.apply(update));
    }

    pub fn reset_filters(&self) {
        self.state
            .send_modify(|state| state.filter_params = FilterParams::default());
    }

    /// Load the filtered reading list using the held filters merged with `params`.
    pub async fn fetch_visualized_data(&self, params: Option<VisualizedQuery>) {
        let query = self.filter_params().merged_with(params.as_ref());
        self.track(
            Action::VisualizedData,
            "Failed to fetch sensor data",
            self.api.get_visualized_sensor_data(&query),
            |state, data| {
                tracing::debug!("Fetched {} visualized readings", data.len());
                state.visualized_data = data;
            },
        )
        .await;
    }

    /// Upload a CSV file, then reload the reading list once the upload succeeded.
    pub async fn upload_csv(&self, file: CsvUpload) {
        let file_name = file.file_name.clone();
        self.begin();
        match self.api.upload_sensor_csv(file).await {
            Ok(response) => {
                tracing::info!("Uploaded {}: {}", file_name, response.message);
                self.fetch_visualized_data(None).await;
            }
            Err(err) => self.fail(&err, "Failed to upload CSV"),
        }
        self.finish();
    }

    pub async fn fetch_summary(&self, params: Option<TimeRange>) {
        let query = self.time_range_with(params);
        self.track(
            Action::Summary,
            "Failed to fetch summary data",
            self.api.get_visualized_summary(&query),
            |state, summary| state.summary = Some(summary),
        )
        .await;
    }

    pub async fn fetch_all_visualized_data(&self, params: PageQuery) {
        let query = PageQuery {
            range: self.time_range_with(Some(params.range.clone())),
            ..params
        };
        self.track(
            Action::Page,
            "Failed to fetch paginated sensor data",
            self.api.get_all_visualized_data(&query),
            |state, page| {
                tracing::debug!("Fetched page of {} readings (total {})", page.data.len(), page.total);
                state.page = Some(page);
            },
        )
        .await;
    }

    pub async fn fetch_7day_comparison(&self) {
        self.track(
            Action::Comparison,
            "Failed to fetch 7-day comparison",
            self.api.get_7day_comparison(),
            |state, series| state.comparison = series,
        )
        .await;
    }

    pub async fn fetch_aggregated_insight(&self, params: InsightQuery) {
        let query = InsightQuery {
            range: self.time_range_with(Some(params.range.clone())),
            ..params
        };
        self.track(
            Action::Insight,
            "Failed to fetch aggregated insight",
            self.api.get_aggregated_insight(&query),
            |state, insights| {
                tracing::debug!("Fetched {} insight buckets ({})", insights.len(), query.window);
                state.insights = insights;
            },
        )
        .await;
    }

    pub async fn fetch_chart_data(&self, params: Option<ChartQuery>) {
        let params = params.unwrap_or_default();
        let held = self.filter_params();
        let query = ChartQuery {
            range: params.range.or(held.time_range()),
            metrics: params.metrics.or(Some(held.metrics)),
        };
        self.track(
            Action::ChartData,
            "Failed to fetch chart data",
            self.api.get_chart_data(&query),
            |state, chart| state.chart_data = Some(chart),
        )
        .await;
    }

    fn time_range_with(&self, params: Option<TimeRange>) -> TimeRange {
        params
            .unwrap_or_default()
            .or(self.state.borrow().filter_params.time_range())
    }

    /// Run one request through the loading/error lifecycle.
    async fn track<T, F>(
        &self,
        action: Action,
        default_error: &str,
        request: F,
        apply: impl FnOnce(&mut SensorState, T),
    ) where
        F: Future<Output = anyhow::Result<T>>,
    {
        let ticket = self.sequencer.issue(action);
        self.begin();

        let result = request.await;
        if self.sequencer.accept(action, ticket) {
            match result {
                Ok(value) => self.state.send_modify(|state| apply(state, value)),
                Err(err) => self.fail(&err, default_error),
            }
        } else {
            tracing::debug!("Discarding stale {:?} response #{}", action, ticket);
        }

        self.finish();
    }

    fn begin(&self) {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });
    }

    fn fail(&self, err: &anyhow::Error, default_error: &str) {
        let message = err.to_string();
        let message = if message.trim().is_empty() {
            default_error.to_string()
        } else {
            message
        };
        tracing::warn!("{}: {:#}", default_error, err);
        self.state.send_modify(|state| state.error = Some(message));
    }

    fn finish(&self) {
        self.state.send_modify(|state| state.loading = false);
    }
}
