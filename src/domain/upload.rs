// CSV upload payloads
use anyhow::Context;
use bytes::Bytes;
use serde::Deserialize;
use std::path::Path;

/// A CSV file ready to be sent as the multipart `file` field.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvUpload {
    pub file_name: String,
    pub content: Bytes,
}

impl CsvUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read CSV file {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self::new(file_name, content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_path_reads_file() {
        let path = std::env::temp_dir().join(format!("sensor-upload-{}.csv", std::process::id()));
        tokio::fs::write(&path, "timestamp,temperature,humidity,air_quality\n")
            .await
            .unwrap();

        let upload = CsvUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, path.file_name().unwrap().to_string_lossy());
        assert!(upload.content.starts_with(b"timestamp,"));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let err = CsvUpload::from_path("/nonexistent/readings.csv").await.unwrap_err();
        assert!(err.to_string().contains("Failed to read CSV file"));
    }
}
