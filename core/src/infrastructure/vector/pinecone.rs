use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{
        common::{VectorIndexConfig, entities::app_errors::CoreError},
        retrieval::{entities::RetrievedDocument, ports::VectorIndex},
    },
    infrastructure::http::{
        build_http_client, delegate_parse_error, delegate_status_error, delegate_transport_error,
    },
};

const SERVICE: &str = "Vector index";
const API_KEY_HEADER: &str = "Api-Key";
const API_VERSION_HEADER: &str = "X-Pinecone-API-Version";
const API_VERSION: &str = "2025-01";

/// Pinecone serverless index plus its hosted inference embeddings.
#[derive(Debug, Clone)]
pub struct PineconeVectorIndex {
    api_key: String,
    api_url: String,
    index_host: String,
    embedding_model: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    parameters: EmbedParameters,
    inputs: Vec<EmbedInput>,
}

#[derive(Debug, Serialize)]
struct EmbedParameters {
    input_type: &'static str,
    truncate: &'static str,
}

#[derive(Debug, Serialize)]
struct EmbedInput {
    text: String,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    data: Vec<Embedding>,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    vector: Vec<f32>,
    top_k: usize,
    include_metadata: bool,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<QueryMatch>,
}

#[derive(Debug, Deserialize)]
struct QueryMatch {
    #[serde(default)]
    score: f32,
    #[serde(default)]
    metadata: Option<MatchMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct MatchMetadata {
    text: Option<String>,
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IndexDescription {
    host: String,
}

impl PineconeVectorIndex {
    /// Builds the client, asking the control plane for the index host when
    /// none is configured.
    #[instrument(skip(config), fields(index = %config.index_name))]
    pub async fn connect(config: VectorIndexConfig, timeout: Duration) -> Result<Self, CoreError> {
        let client = build_http_client(timeout)?;
        let api_url = config.api_url.trim_end_matches('/').to_string();

        let host = match config.index_host.filter(|h| !h.trim().is_empty()) {
            Some(host) => host,
            None => {
                Self::describe_index_host(&client, &api_url, &config.api_key, &config.index_name)
                    .await?
            }
        };

        let index_host = with_scheme(host.trim_end_matches('/'));
        tracing::info!("Vector index host resolved: {}", index_host);

        Ok(Self {
            api_key: config.api_key,
            api_url,
            index_host,
            embedding_model: config.embedding_model,
            client,
        })
    }

    pub fn index_host(&self) -> &str {
        &self.index_host
    }

    async fn describe_index_host(
        client: &Client,
        api_url: &str,
        api_key: &str,
        index_name: &str,
    ) -> Result<String, CoreError> {
        let url = format!("{}/indexes/{}", api_url, index_name);

        let response = client
            .get(&url)
            .header(API_KEY_HEADER, api_key)
            .header(API_VERSION_HEADER, API_VERSION)
            .send()
            .await
            .map_err(|e| delegate_transport_error(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(delegate_status_error(SERVICE, status, &error_text));
        }

        let description: IndexDescription = response
            .json()
            .await
            .map_err(|e| delegate_parse_error(SERVICE, e))?;

        Ok(description.host)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, CoreError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| delegate_transport_error(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(delegate_status_error(SERVICE, status, &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| delegate_parse_error(SERVICE, e))
    }
}

fn with_scheme(host: &str) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

impl VectorIndex for PineconeVectorIndex {
    #[instrument(skip(self, text), fields(model = %self.embedding_model))]
    async fn embed(&self, text: String) -> Result<Vec<f32>, CoreError> {
        let body = EmbedRequest {
            model: &self.embedding_model,
            parameters: EmbedParameters {
                input_type: "query",
                truncate: "END",
            },
            inputs: vec![EmbedInput { text }],
        };

        let url = format!("{}/embed", self.api_url);
        let response: EmbedResponse = self.send(self.client.post(&url).json(&body)).await?;

        response
            .data
            .into_iter()
            .next()
            .map(|embedding| embedding.values)
            .filter(|values| !values.is_empty())
            .ok_or_else(|| {
                tracing::error!("Embedding response carries no vector");
                CoreError::ExternalServiceError("No embedding returned".to_string())
            })
    }

    #[instrument(skip(self, vector), fields(dimension = vector.len()))]
    async fn query(&self, vector: Vec<f32>, top_k: usize) -> Result<Vec<RetrievedDocument>, CoreError> {
        let body = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };

        let url = format!("{}/query", self.index_host);
        let response: QueryResponse = self.send(self.client.post(&url).json(&body)).await?;

        tracing::debug!("Vector query returned {} matches", response.matches.len());

        Ok(response
            .matches
            .into_iter()
            .map(|m| {
                let metadata = m.metadata.unwrap_or_default();
                RetrievedDocument {
                    text: metadata.text.unwrap_or_default(),
                    source: metadata.source,
                    score: m.score,
                }
            })
            .collect())
    }
}
