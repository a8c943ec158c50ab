// Service trait for the remote sensor API
use crate::domain::filter::{ChartQuery, InsightQuery, PageQuery, TimeRange, VisualizedQuery};
use crate::domain::insight::{AggregatedInsight, ChartData, ComparisonSeries, VisualizedSummary};
use crate::domain::sensor::{VisualizedPage, VisualizedSensorData};
use crate::domain::upload::{CsvUpload, UploadResponse};
use async_trait::async_trait;

/// One method per remote operation. Implementations issue exactly one
/// request per call and return errors to the caller untouched.
#[async_trait]
pub trait SensorApi: Send + Sync {
    /// Upload a CSV file of raw readings
    async fn upload_sensor_csv(&self, file: CsvUpload) -> anyhow::Result<UploadResponse>;

    /// Filtered, processed readings
    async fn get_visualized_sensor_data(
        &self,
        params: &VisualizedQuery,
    ) -> anyhow::Result<Vec<VisualizedSensorData>>;

    /// Min/max/mean per metric over a time range
    async fn get_visualized_summary(&self, params: &TimeRange) -> anyhow::Result<VisualizedSummary>;

    /// One page of readings plus the total matching count
    async fn get_all_visualized_data(&self, params: &PageQuery) -> anyhow::Result<VisualizedPage>;

    /// Hourly temperature profiles of the last seven days
    async fn get_7day_comparison(&self) -> anyhow::Result<Vec<ComparisonSeries>>;

    /// Windowed min/max/mean/median buckets
    async fn get_aggregated_insight(
        &self,
        params: &InsightQuery,
    ) -> anyhow::Result<Vec<AggregatedInsight>>;

    /// Chart series with anomaly markers
    async fn get_chart_data(&self, params: &ChartQuery) -> anyhow::Result<ChartData>;
}
