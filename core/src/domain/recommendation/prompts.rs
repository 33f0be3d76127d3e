use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    assessment::entities::leading_number,
    recommendation::entities::{ALTERNATIVES_COUNT, RATIONALE_MAX_WORDS, RecommendationBranch},
};

static OVERALL_RATING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)overall[\s_-]*rating["']?\s*[:=]\s*["']?"#).expect("overall rating pattern")
});

/// Finds `overall rating: 40`, `"overall rating": 40` or
/// `"overall_rating": "40"` anywhere in the text. Mentions without a number
/// are skipped.
pub fn overall_rating_in(text: &str) -> Option<f64> {
    OVERALL_RATING
        .find_iter(text)
        .find_map(|found| leading_number(&text[found.end()..]))
}

pub fn recommendation_prompt(
    branch: RecommendationBranch,
    product_name: &str,
    assessment: &str,
) -> String {
    match branch {
        RecommendationBranch::Alternatives { rating } => format!(
            "The product \"{product_name}\" received an overall rating of {rating} out of 100 \
             for this patient. Assessment: {assessment} \
             Suggest exactly {ALTERNATIVES_COUNT} healthier alternatives to \"{product_name}\". \
             For each alternative give its name followed by a rationale of at most \
             {RATIONALE_MAX_WORDS} words. Return only the {ALTERNATIVES_COUNT} alternatives \
             as a numbered list."
        ),
        RecommendationBranch::NoRecommendation { .. } => format!(
            "The product \"{product_name}\" is acceptable for this patient. \
             Assessment: {assessment} \
             Do not produce any recommendation or alternative products. \
             Reply only with: No recommendation needed."
        ),
    }
}
