use crate::domain::{
    assessment::entities::{AggregateJudgment, Assessment},
    ocr::entities::NutritionLabelText,
    retrieval::entities::{PatientProfile, RetrievedContext},
};

/// First call: per-nutrient safety for the patient, grounded on the
/// retrieved documents.
pub fn primary_assessment_prompt(
    label: &NutritionLabelText,
    profile: &PatientProfile,
    context: &RetrievedContext,
) -> String {
    let profile = profile.to_query_string();
    format!(
        "Based on {context}, just return whether a product with nutrients {label} \
         is safe for a patient with condition {profile}. \
         Please provide the output in the following JSON format: \
         {{\"Nutrients\": {{}}, \"Notes\": []}}. \
         In the \"Nutrients\" section, list each nutrient present in {label} with \"yes\" or \"no\" \
         where yes stands for safe and no stands for not safe. \
         In the \"Notes\" section, provide explanations for each recommendation. \
         No additional text from your side, just JSON.",
        context = context.joined_text(),
        label = label.as_str(),
        profile = profile,
    )
}

/// Second call: collapse nutrient values to yes/no and append the aggregate.
pub fn refinement_prompt(assessment: &Assessment, judgment: AggregateJudgment) -> String {
    let aggregate = match judgment {
        AggregateJudgment::OverallSafety => {
            "add a new entry at the end \"overall safety\": \"yes\" or \"no\" \
             (\"yes\" if there are more yes values than no values, \"no\" otherwise)"
        }
        AggregateJudgment::OverallRating => {
            "add a new entry at the end \"overall rating\": an integer from 0 to 100 \
             where 100 means the product is completely safe for the patient and 0 means \
             it must be avoided"
        }
    };

    format!(
        "For the response {assessment} replace any extra data in the \"Nutrients\" section \
         with just \"yes\" or \"no\" and {aggregate}. Return it in the same JSON format and \
         do not add anything from your side.",
    )
}
