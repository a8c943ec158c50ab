// HTTP implementation of the sensor API
use crate::application::sensor_api::SensorApi;
use crate::domain::filter::{ChartQuery, InsightQuery, PageQuery, TimeRange, VisualizedQuery};
use crate::domain::insight::{
    AggregatedInsight, ChartData, ComparisonSeries, InsightResponse, VisualizedSummary,
};
use crate::domain::sensor::{VisualizedPage, VisualizedSensorData};
use crate::domain::upload::{CsvUpload, UploadResponse};
use crate::infrastructure::config::{ApiSettings, EndpointPaths};
use crate::infrastructure::query::{QueryParams, build_url};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },
    #[error("Malformed response from {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(format!("Network Error: {}", err))
    }
}

#[derive(Debug, Clone)]
pub struct HttpSensorApi {
    base_url: String,
    paths: EndpointPaths,
    client: reqwest::Client,
}

impl HttpSensorApi {
    pub fn new(settings: &ApiSettings) -> anyhow::Result<Self> {
        reqwest::Url::parse(&settings.base_url)
            .map_err(|e| ApiError::InvalidRequest(format!("base url {:?}: {}", settings.base_url, e)))?;

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            paths: settings.paths.clone(),
            client: reqwest::Client::new(),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: QueryParams) -> Result<T, ApiError> {
        let url = build_url(&self.base_url, path, &params);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("{} answered {}: {}", path, status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl SensorApi for HttpSensorApi {
    async fn upload_sensor_csv(&self, file: CsvUpload) -> anyhow::Result<UploadResponse> {
        let path = &self.paths.upload;
        let url = build_url(&self.base_url, path, &QueryParams::new());
        let size = file.content.len();

        let part = Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str("text/csv")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let form = Form::new().part("file", part);

        tracing::debug!("POST {} ({} bytes from {})", url, size, file.file_name);
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(ApiError::from)?;

        Ok(Self::decode(path, response).await?)
    }

    async fn get_visualized_sensor_data(
        &self,
        params: &VisualizedQuery,
    ) -> anyhow::Result<Vec<VisualizedSensorData>> {
        Ok(self.get_json(&self.paths.visualized, params.into()).await?)
    }

    async fn get_visualized_summary(&self, params: &TimeRange) -> anyhow::Result<VisualizedSummary> {
        Ok(self.get_json(&self.paths.summary, params.into()).await?)
    }

    async fn get_all_visualized_data(&self, params: &PageQuery) -> anyhow::Result<VisualizedPage> {
        Ok(self.get_json(&self.paths.paginated, params.into()).await?)
    }

    async fn get_7day_comparison(&self) -> anyhow::Result<Vec<ComparisonSeries>> {
        Ok(self.get_json(&self.paths.comparison, QueryParams::new()).await?)
    }

    async fn get_aggregated_insight(
        &self,
        params: &InsightQuery,
    ) -> anyhow::Result<Vec<AggregatedInsight>> {
        let response: InsightResponse = self.get_json(&self.paths.insight, params.into()).await?;
        Ok(response.into_buckets())
    }

    async fn get_chart_data(&self, params: &ChartQuery) -> anyhow::Result<ChartData> {
        Ok(self.get_json(&self.paths.chart_data, params.into()).await?)
    }
}
