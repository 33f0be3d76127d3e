use std::time::Duration;

use clap::{Args as ClapArgs, Parser};
use labelwise_core::domain::{
    common::{LLMConfig, LabelwiseConfig, OcrConfig, PipelineConfig, VectorIndexConfig},
    ocr::value_objects::PollPolicy,
    retrieval::entities::PatientProfile,
};
use url::Url;

#[derive(Debug, Clone, Parser)]
#[command(name = "labelwise-api", version, about = "Nutrition label assessment API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub vector_index: VectorIndexArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub pipeline: PipelineArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "host", env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "port", env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/api/v1`.
    #[arg(long = "root-path", env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma-separated origins. Any origin is allowed when empty.
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        num_args = 0..
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "azure-endpoint", env = "ENDPOINT")]
    pub endpoint: Url,

    #[arg(long = "azure-key", env = "AZURE_KEY", hide_env_values = true)]
    pub key: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct VectorIndexArgs {
    #[arg(long = "pinecone-key", env = "PINECONE_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long = "pinecone-index", env = "PINECONE_INDEX", default_value = "sample-index")]
    pub index_name: String,

    /// Data plane host of the index. Looked up by name when left out.
    #[arg(long = "pinecone-index-host", env = "PINECONE_INDEX_HOST")]
    pub index_host: Option<String>,

    #[arg(
        long = "pinecone-api-url",
        env = "PINECONE_API_URL",
        default_value = "https://api.pinecone.io"
    )]
    pub api_url: Url,

    #[arg(
        long = "embedding-model",
        env = "EMBEDDING_MODEL",
        default_value = "multilingual-e5-large"
    )]
    pub embedding_model: String,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LLMArgs {
    #[arg(long = "groq-key", env = "GROQ", hide_env_values = true)]
    pub groq_key: String,

    #[arg(long = "groq-model", env = "GROQ_MODEL", default_value = "llama3-8b-8192")]
    pub groq_model: String,

    #[arg(
        long = "groq-base-url",
        env = "GROQ_BASE_URL",
        default_value = "https://api.groq.com/openai/v1"
    )]
    pub groq_base_url: Url,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct PipelineArgs {
    /// Profile used for every field a request does not override.
    #[arg(
        long = "default-profile",
        env = "DEFAULT_PROFILE",
        default_value = "age:65,weight:70,gender:male,condition:Diabetic"
    )]
    pub default_profile: PatientProfile,

    #[arg(long = "default-product-name", env = "DEFAULT_PRODUCT_NAME")]
    pub default_product_name: Option<String>,

    #[arg(long = "top-k", env = "TOP_K", default_value_t = 3)]
    pub top_k: usize,

    #[arg(long = "rating-threshold", env = "RATING_THRESHOLD", default_value_t = 50)]
    pub rating_threshold: u32,

    #[arg(
        long = "ocr-poll-initial-ms",
        env = "OCR_POLL_INITIAL_MS",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ocr_poll_initial_ms: u64,

    #[arg(
        long = "ocr-poll-max-ms",
        env = "OCR_POLL_MAX_MS",
        default_value_t = 8000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub ocr_poll_max_ms: u64,

    #[arg(long = "ocr-timeout-secs", env = "OCR_TIMEOUT_SECS", default_value_t = 60)]
    pub ocr_timeout_secs: u64,

    #[arg(long = "delegate-timeout-secs", env = "DELEGATE_TIMEOUT_SECS", default_value_t = 60)]
    pub delegate_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

fn url_string(url: &Url) -> String {
    url.as_str().trim_end_matches('/').to_string()
}

impl From<Args> for LabelwiseConfig {
    fn from(args: Args) -> Self {
        let defaults = PipelineConfig::default();
        let pipeline = args.pipeline;

        LabelwiseConfig {
            ocr: OcrConfig {
                endpoint: url_string(&args.ocr.endpoint),
                subscription_key: args.ocr.key,
            },
            vector_index: VectorIndexConfig {
                api_key: args.vector_index.api_key,
                api_url: url_string(&args.vector_index.api_url),
                index_name: args.vector_index.index_name,
                index_host: args.vector_index.index_host,
                embedding_model: args.vector_index.embedding_model,
            },
            llm: LLMConfig {
                groq_api_key: args.llm.groq_key,
                groq_model: args.llm.groq_model,
                groq_base_url: url_string(&args.llm.groq_base_url),
            },
            pipeline: PipelineConfig {
                default_profile: pipeline.default_profile,
                default_product_name: pipeline
                    .default_product_name
                    .unwrap_or(defaults.default_product_name),
                top_k: pipeline.top_k,
                rating_threshold: pipeline.rating_threshold,
                ocr_poll: PollPolicy {
                    initial_interval: Duration::from_millis(pipeline.ocr_poll_initial_ms),
                    max_interval: Duration::from_millis(pipeline.ocr_poll_max_ms),
                    timeout: Duration::from_secs(pipeline.ocr_timeout_secs),
                    ..defaults.ocr_poll
                },
            },
            delegate_timeout: Duration::from_secs(pipeline.delegate_timeout_secs),
        }
    }
}
