use tracing::{debug, info, instrument};

use crate::domain::{
    assessment::ports::LLMClient,
    common::{entities::app_errors::CoreError, services::Service},
    ocr::ports::OcrClient,
    retrieval::{
        entities::{PatientProfile, RetrievedContext},
        ports::{RetrievalService, VectorIndex},
    },
};

impl<O, V, L> RetrievalService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(skip(self, profile), fields(top_k = self.pipeline.top_k))]
    async fn retrieve_context(&self, profile: PatientProfile) -> Result<RetrievedContext, CoreError> {
        let query = profile.to_query_string();

        let vector = self.vector_index.embed(query).await?;
        debug!(dimensions = vector.len(), "Profile embedded");

        let documents = self
            .vector_index
            .query(vector, self.pipeline.top_k)
            .await?;

        let context = RetrievedContext::new(documents);
        info!(
            matches = context.documents.len(),
            sources = ?context.sources(),
            "Context retrieved"
        );

        Ok(context)
    }
}
