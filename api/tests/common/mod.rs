#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use clap::Parser;
use labelwise_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use serde_json::{Value, json};
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const IMAGE: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

pub const LABEL_LINES: [&str; 3] = ["Nutrition Facts", "Total Sugars 30g", "Sodium 470mg"];

/// One mock server per delegate.
pub struct Delegates {
    pub ocr: MockServer,
    pub vector: MockServer,
    pub llm: MockServer,
}

impl Delegates {
    pub async fn start() -> Self {
        Self {
            ocr: MockServer::start().await,
            vector: MockServer::start().await,
            llm: MockServer::start().await,
        }
    }

    pub fn args(&self) -> Args {
        Args::try_parse_from([
            "labelwise-api".to_string(),
            "--azure-endpoint".to_string(),
            self.ocr.uri(),
            "--azure-key".to_string(),
            "azure_key".to_string(),
            "--pinecone-key".to_string(),
            "pinecone_key".to_string(),
            "--pinecone-index-host".to_string(),
            self.vector.uri(),
            "--pinecone-api-url".to_string(),
            self.vector.uri(),
            "--groq-key".to_string(),
            "groq_key".to_string(),
            "--groq-base-url".to_string(),
            format!("{}/openai/v1", self.llm.uri()),
            "--ocr-poll-initial-ms".to_string(),
            "10".to_string(),
            "--ocr-poll-max-ms".to_string(),
            "20".to_string(),
            "--ocr-timeout-secs".to_string(),
            "1".to_string(),
            "--delegate-timeout-secs".to_string(),
            "5".to_string(),
        ])
        .expect("test arguments parse")
    }

    pub async fn server(&self) -> TestServer {
        let app_state = state(Arc::new(self.args()))
            .await
            .expect("state builds against mock delegates");
        let app = router(app_state).expect("router builds");
        TestServer::new(app).expect("test server starts")
    }

    /// OCR job that is accepted and reports `status` with `lines` on the first poll.
    pub async fn mount_ocr(&self, status: &str, lines: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/vision/v3.2/read/analyze"))
            .respond_with(ResponseTemplate::new(202).insert_header(
                "Operation-Location",
                format!("{}/vision/v3.2/read/analyzeResults/op-1", self.ocr.uri()).as_str(),
            ))
            .mount(&self.ocr)
            .await;

        let lines: Vec<Value> = lines.iter().map(|text| json!({ "text": text })).collect();
        Mock::given(method("GET"))
            .and(path("/vision/v3.2/read/analyzeResults/op-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": status,
                "analyzeResult": { "readResults": [{ "page": 1, "lines": lines }] }
            })))
            .mount(&self.ocr)
            .await;
    }

    pub async fn mount_retrieval(&self) {
        Mock::given(method("POST"))
            .and(path("/embed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "values": [0.1, 0.2, 0.3] }]
            })))
            .mount(&self.vector)
            .await;

        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "matches": [
                    { "id": "1", "score": 0.9, "metadata": { "text": "Diabetic patients should limit added sugar.", "source": "ada.pdf" } },
                    { "id": "2", "score": 0.8, "metadata": { "text": "Keep sodium under 2300mg a day." } }
                ]
            })))
            .mount(&self.vector)
            .await;
    }

    /// Answers the LLM call whose prompt contains `marker` with `content`.
    pub async fn mount_llm_reply(&self, marker: &str, content: &str) {
        Mock::given(method("POST"))
            .and(path_regex(r"/openai/v1/chat/completions$"))
            .and(body_string_contains(marker))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
            .mount(&self.llm)
            .await;
    }
}

pub fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama3-8b-8192",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}
