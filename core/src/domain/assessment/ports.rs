use std::future::Future;

use crate::domain::{
    assessment::{entities::Assessment, value_objects::AssessmentInput},
    common::entities::app_errors::CoreError,
};

/// Text-generation delegate: single-turn chat completion.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn complete(&self, prompt: String) -> impl Future<Output = Result<String, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait AssessmentService: Send + Sync {
    /// Primary assessment followed by the refinement call.
    fn assess(
        &self,
        input: AssessmentInput,
    ) -> impl Future<Output = Result<Assessment, CoreError>> + Send;
}
