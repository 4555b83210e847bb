use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::generation::value_objects::{
    GenerateContentParams, GenerateContentResponse, GenerateImagesParams, GeneratedImage,
};

pub const GENERATE_CONTENT_ACTION: &str = "generateContent";
pub const GENERATE_IMAGES_ACTION: &str = "generateImages";

/// `{action, params}` envelope accepted by the generation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "camelCase")]
pub enum ProxyRequest {
    GenerateContent(GenerateContentParams),
    GenerateImages(GenerateImagesParams),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProxyRequestError {
    #[error("Missing action or params")]
    MissingActionOrParams,

    #[error("Invalid action specified")]
    InvalidAction,

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

impl ProxyRequest {
    /// Decodes an untrusted request body, telling apart a missing field, an
    /// unknown action and malformed params.
    pub fn from_value(value: Value) -> Result<Self, ProxyRequestError> {
        let object = value
            .as_object()
            .ok_or(ProxyRequestError::MissingActionOrParams)?;

        let action = object
            .get("action")
            .and_then(Value::as_str)
            .ok_or(ProxyRequestError::MissingActionOrParams)?;

        let params = object
            .get("params")
            .filter(|p| !p.is_null())
            .cloned()
            .ok_or(ProxyRequestError::MissingActionOrParams)?;

        let invalid = |e: serde_json::Error| ProxyRequestError::InvalidParams(e.to_string());

        match action {
            GENERATE_CONTENT_ACTION => serde_json::from_value(params)
                .map(ProxyRequest::GenerateContent)
                .map_err(invalid),
            GENERATE_IMAGES_ACTION => serde_json::from_value(params)
                .map(ProxyRequest::GenerateImages)
                .map_err(invalid),
            _ => Err(ProxyRequestError::InvalidAction),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            ProxyRequest::GenerateContent(_) => GENERATE_CONTENT_ACTION,
            ProxyRequest::GenerateImages(_) => GENERATE_IMAGES_ACTION,
        }
    }
}

/// Body returned by the generation endpoint: `{text, candidates}` for content
/// or the list of generated images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProxyResponse {
    Images(Vec<GeneratedImage>),
    Content(GenerateContentResponse),
}
