use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    assessment::entities::{AggregateJudgment, Assessment},
    common::generate_timestamp,
    recommendation::entities::Recommendation,
    retrieval::entities::{PatientProfile, RetrievedContext},
};

/// The two label endpoints run the same pipeline with a different tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisVariant {
    /// Aggregate `overall safety`, no recommendation.
    SafetyCheck,
    /// Aggregate `overall rating`, followed by the recommendation stage.
    RatedWithRecommendation,
}

impl AnalysisVariant {
    pub fn judgment(&self) -> AggregateJudgment {
        match self {
            AnalysisVariant::SafetyCheck => AggregateJudgment::OverallSafety,
            AnalysisVariant::RatedWithRecommendation => AggregateJudgment::OverallRating,
        }
    }

    pub fn recommends(&self) -> bool {
        matches!(self, AnalysisVariant::RatedWithRecommendation)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelAnalysis {
    pub id: Uuid,
    pub variant: AnalysisVariant,
    pub label_text: String,
    pub profile: PatientProfile,
    pub context: RetrievedContext,
    pub assessment: Assessment,
    pub recommendation: Option<Recommendation>,
    /// Text returned to the caller.
    pub output: String,
    pub created_at: DateTime<Utc>,
}

impl LabelAnalysis {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        variant: AnalysisVariant,
        label_text: String,
        profile: PatientProfile,
        context: RetrievedContext,
        assessment: Assessment,
        recommendation: Option<Recommendation>,
        output: String,
    ) -> Self {
        let (now, _) = generate_timestamp();

        Self {
            id,
            variant,
            label_text,
            profile,
            context,
            assessment,
            recommendation,
            output,
            created_at: now,
        }
    }
}
