use tracing::{info, instrument};

use crate::domain::{
    assessment::{ports::LLMClient, response::parse_assessment},
    common::{entities::app_errors::CoreError, services::Service},
    ocr::ports::OcrClient,
    recommendation::{
        entities::{Recommendation, RecommendationBranch},
        ports::RecommendationService,
        prompts::{overall_rating_in, recommendation_prompt},
    },
    retrieval::ports::VectorIndex,
};

impl<O, V, L> RecommendationService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(skip(self, assessment), fields(product_name = %product_name))]
    async fn recommend(
        &self,
        assessment: String,
        product_name: String,
    ) -> Result<Recommendation, CoreError> {
        let rating = parse_assessment(&assessment)
            .ok()
            .and_then(|parsed| parsed.overall_rating())
            .or_else(|| overall_rating_in(&assessment));
        let branch = RecommendationBranch::choose(rating, self.pipeline.rating_threshold);
        info!(?rating, ?branch, "Recommendation branch selected");

        let prompt = recommendation_prompt(branch, &product_name, &assessment);
        let text = self.llm_client.complete(prompt).await?;

        Ok(Recommendation {
            branch,
            product_name,
            text,
        })
    }
}
