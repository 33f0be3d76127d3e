use std::future::Future;

use bytes::Bytes;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ocr::entities::{NutritionLabelText, ReadOperation},
};

/// OCR delegate: asynchronous read jobs.
#[cfg_attr(test, mockall::automock)]
pub trait OcrClient: Send + Sync {
    /// Submits an image and returns the delegate's operation id.
    fn submit_read(&self, image: Bytes) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn get_read_result(
        &self,
        operation_id: String,
    ) -> impl Future<Output = Result<ReadOperation, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait OcrService: Send + Sync {
    fn extract_label_text(
        &self,
        image: Bytes,
    ) -> impl Future<Output = Result<NutritionLabelText, CoreError>> + Send;
}
