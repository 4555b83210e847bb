use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::generate::{__path_generate, generate};
use crate::application::http::server::{
    api_entities::api_error::method_not_allowed, app_state::AppState,
};

#[derive(OpenApi)]
#[openapi(paths(generate))]
pub struct GeminiApiDoc;

pub fn gemini_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/api/gemini", state.args.server.root_path),
        post(generate).fallback(method_not_allowed),
    )
}
