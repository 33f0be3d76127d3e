use tracing::{info, instrument};

use crate::domain::{
    assessment::{
        ports::{AssessmentService, LLMClient},
        value_objects::AssessmentInput,
    },
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    label::{
        entities::LabelAnalysis,
        ports::LabelAnalysisService,
        value_objects::AnalyzeLabelInput,
    },
    ocr::ports::{OcrClient, OcrService},
    recommendation::{entities::compose_output, ports::RecommendationService},
    retrieval::ports::{RetrievalService, VectorIndex},
};

impl<O, V, L> LabelAnalysisService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(
        skip(self, input),
        fields(analysis_id = tracing::field::Empty, variant = ?input.variant)
    )]
    async fn analyze_label(&self, input: AnalyzeLabelInput) -> Result<LabelAnalysis, CoreError> {
        let analysis_id = generate_uuid_v7();
        tracing::Span::current().record("analysis_id", tracing::field::display(analysis_id));

        // Resolve request parameters before spending any delegate call.
        let profile = input.profile.apply(&self.pipeline.default_profile)?;
        let product_name = input
            .product_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.pipeline.default_product_name.clone());

        // 1. OCR
        let label = self.extract_label_text(input.image).await?;

        // 2. Retrieval and assessment
        let context = self.retrieve_context(profile.clone()).await?;
        let assessment = self
            .assess(AssessmentInput {
                label: label.clone(),
                profile: profile.clone(),
                context: context.clone(),
                judgment: input.variant.judgment(),
            })
            .await?;
        let assessment_text = assessment.to_pretty_string();

        // 3. Recommendation
        let (recommendation, output) = if input.variant.recommends() {
            let recommendation = self
                .recommend(assessment_text.clone(), product_name)
                .await?;
            let output = compose_output(&assessment_text, &recommendation);
            (Some(recommendation), output)
        } else {
            (None, assessment_text)
        };

        let analysis = LabelAnalysis::new(
            analysis_id,
            input.variant,
            label.to_string(),
            profile,
            context,
            assessment,
            recommendation,
            output,
        );

        info!(
            output_len = analysis.output.len(),
            created_at = %analysis.created_at.to_rfc3339(),
            "Label analysis complete"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        assessment::ports::MockLLMClient,
        common::PipelineConfig,
        label::entities::AnalysisVariant,
        ocr::{entities::ReadOperation, ports::MockOcrClient},
        recommendation::entities::RecommendationBranch,
        retrieval::{
            entities::RetrievedDocument, ports::MockVectorIndex,
            value_objects::PatientProfileOverrides,
        },
    };

    fn ocr_reading(lines: &'static [&'static str]) -> MockOcrClient {
        let mut ocr = MockOcrClient::new();
        ocr.expect_submit_read()
            .times(1)
            .returning(|_| Box::pin(async { Ok("op-1".to_string()) }));
        ocr.expect_get_read_result().times(1).returning(move |_| {
            Box::pin(async move {
                Ok(ReadOperation::succeeded(
                    lines.iter().map(|l| l.to_string()).collect(),
                ))
            })
        });
        ocr
    }

    fn index_matching(expected_query: &'static str) -> MockVectorIndex {
        let mut index = MockVectorIndex::new();
        index
            .expect_embed()
            .withf(move |text| text == expected_query)
            .times(1)
            .returning(|_| Box::pin(async { Ok(vec![0.5; 4]) }));
        index.expect_query().times(1).returning(|_, _| {
            Box::pin(async {
                Ok(vec![RetrievedDocument {
                    text: "Sodium raises blood pressure.".to_string(),
                    source: Some("heart.pdf".to_string()),
                    score: 0.88,
                }])
            })
        });
        index
    }

    fn input(variant: AnalysisVariant) -> AnalyzeLabelInput {
        AnalyzeLabelInput {
            image: Bytes::from_static(b"\xff\xd8\xff"),
            variant,
            profile: PatientProfileOverrides::default(),
            product_name: None,
        }
    }

    #[tokio::test]
    async fn test_safety_check_returns_refined_assessment() {
        let mut llm = MockLLMClient::new();
        let mut seq = mockall::Sequence::new();
        llm.expect_complete()
            .withf(|p| p.starts_with("Based on Sodium raises blood pressure."))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("```json\n{\"Nutrients\": {\"Sodium\": \"no\"}, \"Notes\": [\"High sodium.\"]}\n```".to_string())
                })
            });
        llm.expect_complete()
            .withf(|p| p.starts_with("For the response"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("{\"Nutrients\": {\"Sodium\": \"no\"}, \"Notes\": [\"High sodium.\"], \"overall safety\": \"no\"}".to_string())
                })
            });

        let service = Service::new(
            ocr_reading(&["Sodium 900mg"]),
            index_matching("age:65,weight:70,gender:male,condition:Diabetic"),
            llm,
            PipelineConfig::default(),
        );

        let analysis = service
            .analyze_label(input(AnalysisVariant::SafetyCheck))
            .await
            .unwrap();

        assert_eq!(analysis.label_text, "Sodium 900mg\n");
        assert!(analysis.recommendation.is_none());
        assert!(analysis.output.contains("\"overall safety\": \"no\""));
        assert_eq!(analysis.output, analysis.assessment.to_pretty_string());
        assert_eq!(analysis.assessment.overall_safety(), Some(false));
        assert_eq!(analysis.id.get_version_num(), 7);
        assert!(analysis.created_at <= chrono::Utc::now());
    }

    #[tokio::test]
    async fn test_rated_variant_appends_recommendation() {
        let mut llm = MockLLMClient::new();
        let mut seq = mockall::Sequence::new();
        llm.expect_complete()
            .withf(|p| p.starts_with("Based on"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("{\"Nutrients\": {\"Sugar\": \"no\"}, \"Notes\": []}".to_string())
                })
            });
        llm.expect_complete()
            .withf(|p| p.starts_with("For the response") && p.contains("\"overall rating\""))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("```\n{\"Nutrients\": {\"Sugar\": \"no\"}, \"Notes\": [], \"overall rating\": 30}\n```".to_string())
                })
            });
        llm.expect_complete()
            .withf(|p| p.contains("Suggest exactly 2 healthier alternatives to \"Cola\""))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Box::pin(async {
                    Ok("`1. Sparkling water: zero sugar.`\n`2. Iced tea, unsweetened: zero sugar.`".to_string())
                })
            });

        let service = Service::new(
            ocr_reading(&["Sugars 39g"]),
            index_matching("age:30,weight:70,gender:female,condition:Diabetic"),
            llm,
            PipelineConfig::default(),
        );

        let mut input = input(AnalysisVariant::RatedWithRecommendation);
        input.profile = PatientProfileOverrides {
            age: Some("30".to_string()),
            gender: Some("female".to_string()),
            ..Default::default()
        };
        input.product_name = Some("Cola".to_string());

        let analysis = service.analyze_label(input).await.unwrap();

        let recommendation = analysis.recommendation.unwrap();
        assert_eq!(
            recommendation.branch,
            RecommendationBranch::Alternatives { rating: 30.0 }
        );
        assert!(!analysis.output.contains('`'));
        assert!(analysis.output.contains("\"overall rating\": 30"));
        assert!(analysis.output.ends_with("2. Iced tea, unsweetened: zero sugar."));
    }

    #[tokio::test]
    async fn test_invalid_profile_fails_before_ocr() {
        let mut ocr = MockOcrClient::new();
        ocr.expect_submit_read().never();

        let service = Service::new(
            ocr,
            MockVectorIndex::new(),
            MockLLMClient::new(),
            PipelineConfig::default(),
        );

        let mut input = input(AnalysisVariant::SafetyCheck);
        input.profile.age = Some("sixty".to_string());

        let err = service.analyze_label(input).await.unwrap_err();
        assert_eq!(err, CoreError::Invalid("age must be a number, got 'sixty'".to_string()));
    }

    #[tokio::test]
    async fn test_failed_ocr_skips_remaining_stages() {
        let mut ocr = MockOcrClient::new();
        ocr.expect_submit_read()
            .times(1)
            .returning(|_| Box::pin(async { Ok("op-1".to_string()) }));
        ocr.expect_get_read_result()
            .times(1)
            .returning(|_| Box::pin(async { Ok(ReadOperation::failed()) }));
        let mut index = MockVectorIndex::new();
        index.expect_embed().never();
        let mut llm = MockLLMClient::new();
        llm.expect_complete().never();

        let service = Service::new(ocr, index, llm, PipelineConfig::default());

        let err = service
            .analyze_label(input(AnalysisVariant::RatedWithRecommendation))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to extract text");
    }
}
