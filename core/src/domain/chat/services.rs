use tracing::{debug, instrument};

use crate::domain::{
    assessment::ports::LLMClient,
    chat::ports::ChatService,
    common::{entities::app_errors::CoreError, services::Service},
    ocr::ports::OcrClient,
    retrieval::ports::VectorIndex,
};

impl<O, V, L> ChatService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    async fn chat(&self, message: String) -> Result<String, CoreError> {
        if message.trim().is_empty() {
            return Err(CoreError::Invalid("message must not be empty".to_string()));
        }

        let response = self.llm_client.complete(message).await?;
        debug!(response_len = response.len(), "Chat completion received");

        Ok(response)
    }
}
