use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    retrieval::entities::{PatientProfile, RetrievedContext, RetrievedDocument},
};

/// Vector index delegate together with its embedding model.
#[cfg_attr(test, mockall::automock)]
pub trait VectorIndex: Send + Sync {
    fn embed(&self, text: String) -> impl Future<Output = Result<Vec<f32>, CoreError>> + Send;

    fn query(
        &self,
        vector: Vec<f32>,
        top_k: usize,
    ) -> impl Future<Output = Result<Vec<RetrievedDocument>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait RetrievalService: Send + Sync {
    fn retrieve_context(
        &self,
        profile: PatientProfile,
    ) -> impl Future<Output = Result<RetrievedContext, CoreError>> + Send;
}
