use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    generation::{
        ports::LLMClient,
        value_objects::{
            GenerateContentParams, GenerateContentResponse, GenerateImagesParams, GeneratedImage,
        },
    },
    proxy::value_objects::ProxyRequest,
};

/// Reaches the provider through the backend proxy endpoint. Carries no
/// credential.
#[derive(Debug, Clone)]
pub struct ProxyLLMClient {
    endpoint: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ProxyErrorBody {
    error: String,
}

impl ProxyLLMClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    async fn call<R: DeserializeOwned>(&self, request: ProxyRequest) -> Result<R, CoreError> {
        let action = request.action();

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Proxy request '{}' failed: {}", action, e);
                CoreError::ExternalServiceError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProxyErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| status.to_string());
            error!("Proxy returned {} for '{}': {}", status, action, message);
            return Err(CoreError::ExternalServiceError(message));
        }

        response.json().await.map_err(|e| {
            error!("Failed to parse proxy response for '{}': {}", action, e);
            CoreError::ExternalServiceError(e.to_string())
        })
    }
}

impl LLMClient for ProxyLLMClient {
    async fn generate_content(
        &self,
        params: GenerateContentParams,
    ) -> Result<GenerateContentResponse, CoreError> {
        self.call(ProxyRequest::GenerateContent(params)).await
    }

    async fn generate_images(
        &self,
        params: GenerateImagesParams,
    ) -> Result<Vec<GeneratedImage>, CoreError> {
        self.call(ProxyRequest::GenerateImages(params)).await
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        domain::generation::value_objects::{ContentPart, GenerationConfig},
        infrastructure::stub::{Recorded, fixed},
    };

    #[tokio::test]
    async fn test_content_is_wrapped_in_action_envelope() {
        let (base_url, seen) = fixed(
            StatusCode::OK,
            json!({ "text": "hello", "candidates": [] }),
        )
        .await;
        let client = ProxyLLMClient::new(format!("{}/api/gemini", base_url));

        let response = client
            .generate_content(GenerateContentParams {
                model: String::new(),
                contents: vec![ContentPart::Text {
                    text: "Say hello".to_string(),
                }],
                config: GenerationConfig::default(),
            })
            .await
            .unwrap();

        assert_eq!(response.text(), Some("hello"));
        let seen = seen.lock().unwrap();
        let Recorded { uri, body, .. } = &seen[0];
        assert_eq!(uri, "/api/gemini");
        assert_eq!(body["action"], "generateContent");
        assert_eq!(body["params"]["contents"][0]["text"], "Say hello");
    }

    #[tokio::test]
    async fn test_images_are_decoded_from_array() {
        let (base_url, seen) = fixed(
            StatusCode::OK,
            json!([{ "image": { "imageBytes": "YWJj", "mimeType": "image/jpeg" } }]),
        )
        .await;
        let client = ProxyLLMClient::new(base_url);

        let images = client
            .generate_images(GenerateImagesParams {
                model: "image-model".to_string(),
                prompt: "Poha".to_string(),
                config: Default::default(),
            })
            .await
            .unwrap();

        assert_eq!(images[0].image.image_bytes, "YWJj");
        assert_eq!(seen.lock().unwrap()[0].body["action"], "generateImages");
    }

    #[tokio::test]
    async fn test_error_body_becomes_external_service_error() {
        let (base_url, _) = fixed(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "An error occurred while processing your request." }),
        )
        .await;
        let client = ProxyLLMClient::new(base_url);

        let err = client
            .generate_images(GenerateImagesParams {
                model: String::new(),
                prompt: "Poha".to_string(),
                config: Default::default(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::ExternalServiceError(
                "An error occurred while processing your request.".to_string()
            )
        );
    }
}
