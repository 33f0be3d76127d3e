use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    domain::{
        common::{OcrConfig, entities::app_errors::CoreError},
        ocr::{
            entities::{ReadOperation, ReadStatus},
            ports::OcrClient,
        },
    },
    infrastructure::http::{
        build_http_client, delegate_parse_error, delegate_status_error, delegate_transport_error,
    },
};

const SERVICE: &str = "OCR";
const READ_API_PATH: &str = "vision/v3.2/read";
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

/// Azure Computer Vision Read API.
#[derive(Debug, Clone)]
pub struct AzureReadClient {
    endpoint: String,
    subscription_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadResultResponse {
    status: ReadStatus,
    analyze_result: Option<AnalyzeResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResult {
    #[serde(default)]
    read_results: Vec<PageResult>,
}

#[derive(Debug, Deserialize)]
struct PageResult {
    #[serde(default)]
    lines: Vec<LineResult>,
}

#[derive(Debug, Deserialize)]
struct LineResult {
    text: String,
}

impl AzureReadClient {
    pub fn new(config: OcrConfig, timeout: Duration) -> Result<Self, CoreError> {
        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            subscription_key: config.subscription_key,
            client: build_http_client(timeout)?,
        })
    }

    fn operation_id(location: &str) -> Option<String> {
        location
            .split('?')
            .next()
            .and_then(|path| path.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
            .map(str::to_string)
    }
}

impl OcrClient for AzureReadClient {
    #[instrument(skip(self, image), fields(image_size = image.len()))]
    async fn submit_read(&self, image: Bytes) -> Result<String, CoreError> {
        let url = format!("{}/{}/analyze", self.endpoint, READ_API_PATH);

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image)
            .send()
            .await
            .map_err(|e| delegate_transport_error(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(delegate_status_error(SERVICE, status, &error_text));
        }

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(Self::operation_id)
            .ok_or_else(|| {
                tracing::error!("OCR API response carries no {} header", OPERATION_LOCATION_HEADER);
                CoreError::ExternalServiceError(format!(
                    "OCR API response is missing the {} header",
                    OPERATION_LOCATION_HEADER
                ))
            })
    }

    #[instrument(skip(self))]
    async fn get_read_result(&self, operation_id: String) -> Result<ReadOperation, CoreError> {
        let url = format!(
            "{}/{}/analyzeResults/{}",
            self.endpoint, READ_API_PATH, operation_id
        );

        let response = self
            .client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .send()
            .await
            .map_err(|e| delegate_transport_error(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(delegate_status_error(SERVICE, status, &error_text));
        }

        let result: ReadResultResponse = response
            .json()
            .await
            .map_err(|e| delegate_parse_error(SERVICE, e))?;

        if result.status != ReadStatus::Succeeded {
            return Ok(ReadOperation::pending(result.status));
        }

        let lines = result
            .analyze_result
            .map(|analyze| {
                analyze
                    .read_results
                    .into_iter()
                    .flat_map(|page| page.lines)
                    .map(|line| line.text)
                    .collect()
            })
            .unwrap_or_default();

        Ok(ReadOperation::succeeded(lines))
    }
}
