use std::sync::Arc;

use crate::domain::{
    assessment::ports::LLMClient, common::PipelineConfig, ocr::ports::OcrClient,
    retrieval::ports::VectorIndex,
};

/// Pipeline service, generic over the three delegate ports.
///
/// Delegate handles are created once at startup and shared read-only.
pub struct Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    pub(crate) ocr_client: Arc<O>,
    pub(crate) vector_index: Arc<V>,
    pub(crate) llm_client: Arc<L>,
    pub(crate) pipeline: PipelineConfig,
}

impl<O, V, L> Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    pub fn new(ocr_client: O, vector_index: V, llm_client: L, pipeline: PipelineConfig) -> Self {
        Self {
            ocr_client: Arc::new(ocr_client),
            vector_index: Arc::new(vector_index),
            llm_client: Arc::new(llm_client),
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &PipelineConfig {
        &self.pipeline
    }
}

impl<O, V, L> Clone for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    fn clone(&self) -> Self {
        Self {
            ocr_client: Arc::clone(&self.ocr_client),
            vector_index: Arc::clone(&self.vector_index),
            llm_client: Arc::clone(&self.llm_client),
            pipeline: self.pipeline.clone(),
        }
    }
}
