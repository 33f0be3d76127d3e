use bytes::Bytes;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument, warn};

use crate::domain::{
    assessment::ports::LLMClient,
    common::{entities::app_errors::CoreError, services::Service},
    ocr::{
        entities::{NutritionLabelText, ReadStatus},
        ports::{OcrClient, OcrService},
    },
    retrieval::ports::VectorIndex,
};

impl<O, V, L> OcrService for Service<O, V, L>
where
    O: OcrClient,
    V: VectorIndex,
    L: LLMClient,
{
    #[instrument(skip(self, image), fields(image_size = image.len()))]
    async fn extract_label_text(&self, image: Bytes) -> Result<NutritionLabelText, CoreError> {
        let policy = &self.pipeline.ocr_poll;

        let operation_id = self.ocr_client.submit_read(image).await?;
        info!(operation_id = %operation_id, "OCR read job submitted");

        let started = Instant::now();
        let mut interval = policy.initial_interval;
        let mut attempts: u32 = 0;

        let operation = loop {
            attempts += 1;
            let operation = self
                .ocr_client
                .get_read_result(operation_id.clone())
                .await?;

            if !operation.status.is_pending() {
                break operation;
            }

            if started.elapsed() + interval > policy.timeout {
                warn!(
                    operation_id = %operation_id,
                    attempts,
                    timeout_secs = policy.timeout.as_secs(),
                    "OCR read job did not finish within its time budget"
                );
                return Err(CoreError::ExtractionFailed);
            }

            debug!(status = %operation.status, ?interval, "OCR read job still pending");
            sleep(interval).await;
            interval = policy.next_interval(interval);
        };

        if operation.status != ReadStatus::Succeeded {
            warn!(
                operation_id = %operation_id,
                status = %operation.status,
                "OCR read job ended without result"
            );
            return Err(CoreError::ExtractionFailed);
        }

        let text = NutritionLabelText::from_lines(&operation.lines).ok_or_else(|| {
            warn!(operation_id = %operation_id, "OCR read job recognized no text");
            CoreError::ExtractionFailed
        })?;

        info!(attempts, lines = text.line_count(), "OCR complete");

        Ok(text)
    }
}
