use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{
        assessment::ports::LLMClient,
        common::{LLMConfig, entities::app_errors::CoreError},
    },
    infrastructure::http::{
        build_http_client, delegate_parse_error, delegate_status_error, delegate_transport_error,
    },
};

const SERVICE: &str = "LLM";

/// Groq chat completions (OpenAI-compatible).
#[derive(Debug, Clone)]
pub struct GroqLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl GroqLLMClient {
    pub fn new(config: LLMConfig, timeout: Duration) -> Result<Self, CoreError> {
        Ok(Self {
            api_key: config.groq_api_key,
            model_name: config.groq_model,
            base_url: config.groq_base_url.trim_end_matches('/').to_string(),
            client: build_http_client(timeout)?,
        })
    }

    async fn call_chat_api(&self, request: ChatCompletionRequest) -> Result<String, CoreError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| delegate_transport_error(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(delegate_status_error(SERVICE, status, &error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| delegate_parse_error(SERVICE, e))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CoreError::ExternalServiceError("No response from LLM".to_string()))
    }
}

impl LLMClient for GroqLLMClient {
    #[instrument(skip(self, prompt), fields(model = %self.model_name, prompt_len = prompt.len()))]
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        let request = ChatCompletionRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        self.call_chat_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> GroqLLMClient {
        GroqLLMClient::new(
            LLMConfig {
                groq_api_key: "test_key".to_string(),
                groq_model: "llama3-8b-8192".to_string(),
                groq_base_url: format!("{}/openai/v1/", server.uri()),
            },
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_complete_sends_single_user_turn() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .and(header("Authorization", "Bearer test_key"))
            .and(body_partial_json(json!({
                "model": "llama3-8b-8192",
                "messages": [{"role": "user", "content": "Is salt safe?"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "model": "llama3-8b-8192",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": "  In small amounts.\n"},
                    "finish_reason": "stop"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client(&server)
            .complete("Is salt safe?".to_string())
            .await
            .unwrap();

        assert_eq!(reply, "  In small amounts.\n");
    }

    #[tokio::test]
    async fn test_error_status_surfaces_delegate_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {"message": "Invalid API Key", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .complete("hello".to_string())
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "LLM API returned error: 401 Unauthorized - Invalid API Key"
        );
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client(&server)
            .complete("hello".to_string())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No response from LLM");
    }
}
