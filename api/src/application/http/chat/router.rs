use super::handlers::chat_completion::{__path_chat_completion, chat_completion};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(chat_completion))]
pub struct ChatApiDoc;

pub fn chat_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/groq", state.args.server.root_path),
        post(chat_completion),
    )
}
