use crate::domain::{
    assessment::entities::AggregateJudgment,
    ocr::entities::NutritionLabelText,
    retrieval::entities::{PatientProfile, RetrievedContext},
};

#[derive(Debug, Clone)]
pub struct AssessmentInput {
    pub label: NutritionLabelText,
    pub profile: PatientProfile,
    pub context: RetrievedContext,
    pub judgment: AggregateJudgment,
}
