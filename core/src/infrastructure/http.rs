use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::domain::common::entities::app_errors::CoreError;

pub fn build_http_client(timeout: Duration) -> Result<Client, CoreError> {
    Client::builder().timeout(timeout).build().map_err(|e| {
        tracing::error!("Failed to build HTTP client: {}", e);
        CoreError::InternalServerError
    })
}

/// `{"error": {"message": ...}}` as returned by the OpenAI-compatible and
/// Azure Cognitive Services APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

/// Error for a non-success delegate response. Prefers the delegate's own
/// message over the raw body.
pub fn delegate_status_error(service: &str, status: StatusCode, body: &str) -> CoreError {
    let detail = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.chars().take(200).collect());

    tracing::error!("{} API error: {} - {}", service, status, detail);
    CoreError::ExternalServiceError(format!(
        "{} API returned error: {} - {}",
        service, status, detail
    ))
}

pub fn delegate_transport_error(service: &str, error: reqwest::Error) -> CoreError {
    tracing::error!("{} API request failed: {}", service, error);
    CoreError::ExternalServiceError(format!("{} API error: {}", service, error))
}

pub fn delegate_parse_error(service: &str, error: impl std::fmt::Display) -> CoreError {
    tracing::error!("Failed to parse {} response: {}", service, error);
    CoreError::ExternalServiceError(format!("Failed to parse {} response: {}", service, error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_delegate_message() {
        let err = delegate_status_error(
            "LLM",
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error": {"message": "Rate limit reached", "type": "tokens"}}"#,
        );
        assert_eq!(
            err.to_string(),
            "LLM API returned error: 429 Too Many Requests - Rate limit reached"
        );

        let err = delegate_status_error("OCR", StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            err.to_string(),
            "OCR API returned error: 502 Bad Gateway - upstream down"
        );
    }
}
