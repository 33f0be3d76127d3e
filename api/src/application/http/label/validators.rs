use axum::extract::{
    Multipart,
    multipart::{Field, MultipartError, MultipartRejection},
};
use bytes::Bytes;
use labelwise_core::domain::{
    label::{entities::AnalysisVariant, value_objects::AnalyzeLabelInput},
    retrieval::value_objects::PatientProfileOverrides,
};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Request body limit for the label routes, leaving room for the text fields.
pub const MAX_UPLOAD_BODY: usize = MAX_IMAGE_SIZE + 64 * 1024;

/// Multipart form accepted by both label routes.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct LabelUploadForm {
    /// Photo of the nutrition label.
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub age: Option<String>,
    pub weight: Option<String>,
    pub height: Option<String>,
    pub gender: Option<String>,
    /// Repeat the field for several conditions.
    pub condition: Option<Vec<String>>,
    pub product_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema, PartialEq)]
pub struct ExtractLabelResponse {
    #[serde(rename = "Chat")]
    pub chat: String,
}

#[derive(Debug, Default)]
pub struct LabelUpload {
    pub image: Bytes,
    pub profile: PatientProfileOverrides,
    pub product_name: Option<String>,
}

impl LabelUpload {
    /// Reads the form. A request without a readable, non-empty `image` part is
    /// rejected with "No file provided", whatever else went wrong.
    pub async fn read(multipart: Result<Multipart, MultipartRejection>) -> Result<Self, ApiError> {
        let mut multipart = multipart.map_err(|rejection| {
            warn!("Label upload is not multipart: {}", rejection);
            ApiError::no_file()
        })?;

        let mut upload = LabelUpload::default();
        let mut image: Option<Bytes> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err(unreadable_form(e, image.is_some())),
            };

            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "image" => {
                    let data = field.bytes().await.map_err(|e| unreadable_form(e, false))?;

                    if data.len() > MAX_IMAGE_SIZE {
                        return Err(image_too_large());
                    }
                    if !data.is_empty() {
                        image = Some(data);
                    }
                }
                "age" => upload.profile.age = text_value(field).await?,
                "weight" => upload.profile.weight = text_value(field).await?,
                "height" => upload.profile.height = text_value(field).await?,
                "gender" => upload.profile.gender = text_value(field).await?,
                "condition" => {
                    if let Some(condition) = text_value(field).await? {
                        upload.profile.conditions.push(condition);
                    }
                }
                "product_name" => upload.product_name = text_value(field).await?,
                _ => {}
            }
        }

        upload.image = image.ok_or_else(|| {
            warn!("Label upload carries no image");
            ApiError::no_file()
        })?;

        Ok(upload)
    }

    pub fn into_input(self, variant: AnalysisVariant) -> AnalyzeLabelInput {
        AnalyzeLabelInput {
            image: self.image,
            variant,
            profile: self.profile,
            product_name: self.product_name,
        }
    }
}

async fn text_value(field: Field<'_>) -> Result<Option<String>, ApiError> {
    let name = field.name().unwrap_or("").to_string();
    let value = field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read {}: {}", name, e)))?;

    let value = value.trim();
    Ok((!value.is_empty()).then(|| value.to_string()))
}

fn image_too_large() -> ApiError {
    ApiError::BadRequest(format!(
        "Image too large. Max size is {} bytes",
        MAX_IMAGE_SIZE
    ))
}

fn unreadable_form(error: MultipartError, has_image: bool) -> ApiError {
    if error.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        return image_too_large();
    }

    warn!("Failed to read multipart field: {}", error);
    if has_image {
        ApiError::BadRequest(format!("Failed to read multipart field: {}", error))
    } else {
        ApiError::no_file()
    }
}
