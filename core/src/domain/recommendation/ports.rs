use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError, recommendation::entities::Recommendation,
};

#[cfg_attr(test, mockall::automock)]
pub trait RecommendationService: Send + Sync {
    /// Branches on the `overall rating` entry of `assessment`, falling back to
    /// a text search when it is not a JSON assessment.
    fn recommend(
        &self,
        assessment: String,
        product_name: String,
    ) -> impl Future<Output = Result<Recommendation, CoreError>> + Send;
}
