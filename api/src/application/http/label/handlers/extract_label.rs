use axum::extract::{Multipart, State, multipart::MultipartRejection};
use labelwise_core::domain::label::{entities::AnalysisVariant, ports::LabelAnalysisService};

use crate::application::http::{
    label::validators::{ExtractLabelResponse, LabelUpload, LabelUploadForm},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/extract",
    tag = "label",
    summary = "Assess a nutrition label",
    description = "Reads the label in the uploaded image and returns a per-nutrient safety assessment for the patient profile, with an overall safety verdict.",
    request_body(content = LabelUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ExtractLabelResponse),
        (status = 400, description = "No image or invalid profile", body = ApiErrorResponse),
        (status = 500, description = "A delegate failed", body = ApiErrorResponse)
    ),
)]
pub async fn extract_label(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<ExtractLabelResponse>, ApiError> {
    let upload = LabelUpload::read(multipart).await?;

    let analysis = state
        .service
        .analyze_label(upload.into_input(AnalysisVariant::SafetyCheck))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ExtractLabelResponse {
        chat: analysis.output,
    }))
}
