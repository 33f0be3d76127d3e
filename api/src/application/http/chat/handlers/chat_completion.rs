use axum::extract::State;
use labelwise_core::domain::chat::ports::ChatService;

use crate::application::http::{
    chat::validators::{ChatRequest, ChatResponse},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/api/groq",
    tag = "chat",
    summary = "Single-turn chat completion",
    description = "Forwards the message to the language model and returns its reply unchanged.",
    request_body = ChatRequest,
    responses(
        (status = 200, body = ChatResponse),
        (status = 400, description = "Malformed body or empty message", body = ApiErrorResponse),
        (status = 500, description = "The language model failed", body = ApiErrorResponse)
    ),
)]
pub async fn chat_completion(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<ChatRequest>,
) -> Result<Response<ChatResponse>, ApiError> {
    let response = state
        .service
        .chat(payload.message)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(ChatResponse { response }))
}
