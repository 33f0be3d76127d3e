use crate::application::http::{
    chat::router::ChatApiDoc, health::HealthApiDoc, label::router::LabelApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "Labelwise API",
    description = "Nutrition label safety assessment for a patient profile"
))]
pub struct ApiDoc;

impl ApiDoc {
    /// Document covering every route group.
    pub fn merged() -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(LabelApiDoc::openapi());
        openapi.merge(ChatApiDoc::openapi());
        openapi.merge(HealthApiDoc::openapi());
        openapi
    }
}
