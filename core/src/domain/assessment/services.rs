use tracing::{debug, info, instrument, warn};

use crate::domain::{
    assessment::{
        entities::Assessment,
        ports::{AssessmentService, LLMClient},
        prompts::{primary_assessment_prompt, refinement_prompt},
        response::parse_assessment,
        value_objects::AssessmentInput,
    },
    common::{entities::app_errors::CoreError, services::Service},
    ocr::ports::OcrClient,
    retrieval::ports::VectorIndex,
};

impl<O, V, L> AssessmentService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(skip(self, input), fields(judgment = %input.judgment))]
    async fn assess(&self, input: AssessmentInput) -> Result<Assessment, CoreError> {
        let prompt = primary_assessment_prompt(&input.label, &input.profile, &input.context);
        let raw = self.llm_client.complete(prompt).await?;
        debug!(response_len = raw.len(), "Primary assessment received");

        let primary = parse_assessment(&raw).inspect_err(|e| {
            warn!(error = %e, "Primary assessment is not usable");
        })?;

        let raw = self
            .llm_client
            .complete(refinement_prompt(&primary, input.judgment))
            .await?;
        debug!(response_len = raw.len(), "Refined assessment received");

        let refined = parse_assessment(&raw).inspect_err(|e| {
            warn!(error = %e, "Refined assessment is not usable");
        })?;

        if refined.aggregate(input.judgment).is_none() {
            warn!("Refined assessment has no {} entry", input.judgment);
        }

        info!(
            nutrients = refined.nutrients().map(|n| n.len()).unwrap_or_default(),
            overall_safety = ?refined.overall_safety(),
            overall_rating = ?refined.overall_rating(),
            "Assessment complete"
        );

        Ok(refined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        assessment::{entities::AggregateJudgment, ports::MockLLMClient},
        common::PipelineConfig,
        ocr::{entities::NutritionLabelText, ports::MockOcrClient},
        retrieval::{
            entities::{PatientProfile, RetrievedContext},
            ports::MockVectorIndex,
        },
    };

    fn service(llm: MockLLMClient) -> Service<MockOcrClient, MockVectorIndex, MockLLMClient> {
        Service::new(
            MockOcrClient::new(),
            MockVectorIndex::new(),
            llm,
            PipelineConfig::default(),
        )
    }

    fn input(judgment: AggregateJudgment) -> AssessmentInput {
        AssessmentInput {
            label: NutritionLabelText::from_lines(["Sugars 25g", "Protein 3g"]).unwrap(),
            profile: PatientProfile::default(),
            context: RetrievedContext::default(),
            judgment,
        }
    }

    #[tokio::test]
    async fn test_chains_primary_and_refinement() {
        let mut llm = MockLLMClient::new();
        let mut seq = mockall::Sequence::new();
        llm.expect_complete()
            .withf(|prompt| prompt.contains("Sugars 25g"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("Here is the JSON:\n```\n{\"Nutrients\": {\"Sugar\": \"no, 25g is high\", \"Protein\": \"yes\"}, \"Notes\": [\"Too sweet.\"]}\n```".to_string())
                })
            });
        llm.expect_complete()
            .withf(|prompt| {
                prompt.starts_with("For the response {\"Nutrients\"")
                    && prompt.contains("\"overall safety\"")
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("{\"Nutrients\": {\"Sugar\": \"no\", \"Protein\": \"yes\"}, \"Notes\": [\"Too sweet.\"], \"overall safety\": \"no\"}".to_string())
                })
            });

        let assessment = service(llm)
            .assess(input(AggregateJudgment::OverallSafety))
            .await
            .unwrap();

        assert_eq!(assessment.nutrients().unwrap()["Sugar"], "no");
        assert_eq!(assessment.overall_safety(), Some(false));
    }

    #[tokio::test]
    async fn test_malformed_primary_stops_before_refinement() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete()
            .times(1)
            .returning(|_| Box::pin(async { Ok("Sorry, I can't read that label.".to_string()) }));

        let err = service(llm)
            .assess(input(AggregateJudgment::OverallRating))
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::MalformedDelegateResponse(_)));
    }

    #[tokio::test]
    async fn test_llm_error_propagates_verbatim() {
        let mut llm = MockLLMClient::new();
        llm.expect_complete().times(1).returning(|_| {
            Box::pin(async {
                Err(CoreError::ExternalServiceError(
                    "Rate limit reached for model".to_string(),
                ))
            })
        });

        let err = service(llm)
            .assess(input(AggregateJudgment::OverallSafety))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Rate limit reached for model");
    }
}
