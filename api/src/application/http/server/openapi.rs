use utoipa::OpenApi;

use crate::application::http::{
    gemini::router::GeminiApiDoc,
    server::config::{__path_get_config, get_config},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Savora API"
    ),
    paths(get_config),
    nest(
        (path = "/api", api = GeminiApiDoc),
    )
)]
pub struct ApiDoc;
