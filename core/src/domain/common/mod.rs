use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

use crate::domain::{ocr::value_objects::PollPolicy, retrieval::entities::PatientProfile};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct LabelwiseConfig {
    pub ocr: OcrConfig,
    pub vector_index: VectorIndexConfig,
    pub llm: LLMConfig,
    pub pipeline: PipelineConfig,
    /// Upper bound for any single HTTP call to a delegate.
    pub delegate_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub endpoint: String,
    pub subscription_key: String,
}

#[derive(Clone, Debug)]
pub struct VectorIndexConfig {
    pub api_key: String,
    pub api_url: String,
    pub index_name: String,
    pub index_host: Option<String>,
    pub embedding_model: String,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub groq_api_key: String,
    pub groq_model: String,
    pub groq_base_url: String,
}

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub default_profile: PatientProfile,
    pub default_product_name: String,
    pub top_k: usize,
    /// Ratings strictly below this trigger the alternatives prompt.
    pub rating_threshold: u32,
    pub ocr_poll: PollPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            default_profile: PatientProfile::default(),
            default_product_name: "the scanned product".to_string(),
            top_k: 3,
            rating_threshold: 50,
            ocr_poll: PollPolicy::default(),
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
