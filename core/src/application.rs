use crate::{
    domain::common::{LabelwiseConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        llm::GroqLLMClient, ocr::AzureReadClient, vector::PineconeVectorIndex,
    },
};

pub type LabelwiseService = Service<AzureReadClient, PineconeVectorIndex, GroqLLMClient>;

/// Wires the delegate clients into the pipeline service. Resolves the vector
/// index host, so this needs the vector API to be reachable unless a host is
/// configured.
pub async fn create_service(config: LabelwiseConfig) -> Result<LabelwiseService, CoreError> {
    let ocr_client = AzureReadClient::new(config.ocr, config.delegate_timeout)?;
    let vector_index =
        PineconeVectorIndex::connect(config.vector_index, config.delegate_timeout).await?;
    let llm_client = GroqLLMClient::new(config.llm, config.delegate_timeout)?;

    Ok(Service::new(
        ocr_client,
        vector_index,
        llm_client,
        config.pipeline,
    ))
}
