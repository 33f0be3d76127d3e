use super::handlers::{
    extract_label::{__path_extract_label, extract_label},
    extract_nutrition_label::{__path_extract_nutrition_label, extract_nutrition_label},
};
use super::validators::MAX_UPLOAD_BODY;
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(extract_label, extract_nutrition_label))]
pub struct LabelApiDoc;

pub fn label_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/extract", state.args.server.root_path),
            post(extract_label),
        )
        .route(
            &format!("{}/extract_nutrition_label", state.args.server.root_path),
            post(extract_nutrition_label),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BODY))
}
