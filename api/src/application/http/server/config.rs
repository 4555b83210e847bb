use axum::extract::State;
use savora_core::domain::common::PublicConfig;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "/api/config",
    tag = "config",
    summary = "Public client configuration",
    description = "OAuth client id and hosted backend settings that are safe to ship to a browser. The provider key is never part of it.",
    responses(
        (status = 200, body = PublicConfig)
    )
)]
pub async fn get_config(State(state): State<AppState>) -> Result<Response<PublicConfig>, ApiError> {
    Ok(Response::OK(state.public_config.clone()))
}
