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
    path = "/extract_nutrition_label",
    tag = "label",
    summary = "Rate a nutrition label and recommend alternatives",
    description = "Reads the label in the uploaded image, rates the product from 0 to 100 for the patient profile and, when the rating is low, suggests two healthier alternatives.",
    request_body(content = LabelUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = ExtractLabelResponse),
        (status = 400, description = "No image or invalid profile", body = ApiErrorResponse),
        (status = 500, description = "A delegate failed", body = ApiErrorResponse)
    ),
)]
pub async fn extract_nutrition_label(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<ExtractLabelResponse>, ApiError> {
    let upload = LabelUpload::read(multipart).await?;

    let analysis = state
        .service
        .analyze_label(upload.into_input(AnalysisVariant::RatedWithRecommendation))
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ExtractLabelResponse {
        chat: analysis.output,
    }))
}
