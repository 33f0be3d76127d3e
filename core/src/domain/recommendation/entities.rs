use serde::{Deserialize, Serialize};

pub const ALTERNATIVES_COUNT: usize = 2;
pub const RATIONALE_MAX_WORDS: usize = 15;

/// Which recommendation prompt was sent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationBranch {
    /// Rating below the threshold: ask for healthier alternatives.
    Alternatives { rating: f64 },
    /// Rating at or above the threshold, or no rating found.
    NoRecommendation { rating: Option<f64> },
}

impl RecommendationBranch {
    pub fn choose(rating: Option<f64>, threshold: u32) -> Self {
        match rating {
            Some(rating) if rating < f64::from(threshold) => Self::Alternatives { rating },
            rating => Self::NoRecommendation { rating },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub branch: RecommendationBranch,
    pub product_name: String,
    pub text: String,
}

/// Final text for the recommendation variant. Backticks are stripped so
/// delegate code fences never reach the caller.
pub fn compose_output(assessment: &str, recommendation: &Recommendation) -> String {
    format!("{}\n\n{}", assessment.trim(), recommendation.text.trim()).replace('`', "")
}
