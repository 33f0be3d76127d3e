use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label::{entities::LabelAnalysis, value_objects::AnalyzeLabelInput},
};

/// Full extract → retrieve/assess → recommend pipeline for one image.
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisService: Send + Sync {
    fn analyze_label(
        &self,
        input: AnalyzeLabelInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;
}
