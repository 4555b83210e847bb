use axum::extract::State;
use bytes::Bytes;
use savora_core::domain::proxy::{ProxyRequest, ProxyRequestError, ProxyResponse, ProxyService};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{
        api_error::{ApiError, ErrorBody},
        response::Response,
    },
    app_state::AppState,
};

/// `{action, params}` envelope. `params` is handed to the provider as is.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateRequest {
    #[schema(example = "generateContent")]
    pub action: String,
    #[schema(value_type = Object)]
    pub params: Value,
}

#[utoipa::path(
    post,
    path = "/gemini",
    tag = "gemini",
    summary = "Forward a generation request",
    description = "Runs `generateContent` or `generateImages` with the server held provider key. Content responses are trimmed to `{text, candidates}`, image responses to the list of generated images.",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Trimmed provider payload"),
        (status = 400, body = ErrorBody),
        (status = 405, body = ErrorBody),
        (status = 500, body = ErrorBody)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response<ProxyResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        debug!("Unreadable generation request body: {}", e);
        ProxyRequestError::MissingActionOrParams
    })?;

    let request = ProxyRequest::from_value(value)?;
    let response = state.proxy_service.forward(request).await?;

    Ok(Response::OK(response))
}
