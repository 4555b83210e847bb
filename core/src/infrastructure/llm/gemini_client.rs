use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::domain::{
    common::entities::app_errors::CoreError,
    generation::{
        ports::LLMClient,
        value_objects::{
            Candidate, ContentPart, GenerateContentParams, GenerateContentResponse,
            GenerateImagesParams, GeneratedImage, GeneratedImageData, Tool,
        },
    },
};

/// Calls the provider REST API directly. Holds the credential, so it only
/// ever runs server side.
#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig<'a>>,
    #[serde(skip_serializing_if = "no_tools")]
    tools: &'a [Tool],
}

fn no_tools(tools: &&[Tool]) -> bool {
    tools.is_empty()
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: &'a [ContentPart],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<&'a serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: [PromptInstance<'a>; 1],
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PromptInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    aspect_ratio: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_options: Option<OutputOptions<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputOptions<'a> {
    mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
    mime_type: Option<String>,
}

impl GeminiLLMClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    async fn call_gemini_api<B, R>(&self, model: &str, method: &str, body: &B) -> Result<R, CoreError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, method, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                // The url carries the api key.
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::ExternalServiceError(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
        })
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate_content(
        &self,
        params: GenerateContentParams,
    ) -> Result<GenerateContentResponse, CoreError> {
        let config = &params.config;
        let generation_config = (config.response_mime_type.is_some()
            || config.response_schema.is_some())
        .then(|| GeminiGenerationConfig {
            response_mime_type: config.response_mime_type.as_deref(),
            response_schema: config.response_schema.as_ref(),
        });

        let request = GeminiRequest {
            contents: vec![Content {
                role: "user",
                parts: &params.contents,
            }],
            generation_config,
            tools: &config.tools,
        };

        let response: GeminiResponse = self
            .call_gemini_api(&params.model, "generateContent", &request)
            .await?;

        if response.candidates.is_empty() {
            return Err(CoreError::ExternalServiceError(
                "No response from LLM".to_string(),
            ));
        }

        Ok(GenerateContentResponse::from_candidates(response.candidates))
    }

    async fn generate_images(
        &self,
        params: GenerateImagesParams,
    ) -> Result<Vec<GeneratedImage>, CoreError> {
        let config = &params.config;
        let request = PredictRequest {
            instances: [PromptInstance {
                prompt: &params.prompt,
            }],
            parameters: PredictParameters {
                sample_count: config.number_of_images.max(1),
                aspect_ratio: config.aspect_ratio.as_deref(),
                output_options: config
                    .output_mime_type
                    .as_deref()
                    .map(|mime_type| OutputOptions { mime_type }),
            },
        };

        let response: PredictResponse = self
            .call_gemini_api(&params.model, "predict", &request)
            .await?;

        Ok(response
            .predictions
            .into_iter()
            .filter_map(|p| {
                Some(GeneratedImage {
                    image: GeneratedImageData {
                        image_bytes: p.bytes_base64_encoded?,
                        mime_type: p.mime_type,
                    },
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::{
        domain::generation::value_objects::{GenerationConfig, ImageGenerationConfig},
        infrastructure::stub::{Recorded, fixed},
    };

    #[tokio::test]
    async fn test_generate_content_posts_structured_request() {
        let (base_url, seen) = fixed(
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "[1," }, { "text": "2]" }], "role": "model" },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "totalTokenCount": 12 }
            }),
        )
        .await;
        let client = GeminiLLMClient::new("secret".to_string(), format!("{}/", base_url));

        let response = client
            .generate_content(GenerateContentParams {
                model: "text-model".to_string(),
                contents: vec![ContentPart::Text {
                    text: "List two numbers".to_string(),
                }],
                config: GenerationConfig::structured(json!({ "type": "ARRAY" })),
            })
            .await
            .unwrap();

        assert_eq!(response.text(), Some("[1,2]"));
        assert_eq!(response.candidates.len(), 1);

        let seen = seen.lock().unwrap();
        let Recorded { uri, body, .. } = &seen[0];
        assert_eq!(uri, "/models/text-model:generateContent?key=secret");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "List two numbers");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body.get("tools").is_none());
    }

    #[tokio::test]
    async fn test_grounded_search_sends_tools_only() {
        let (base_url, seen) = fixed(
            StatusCode::OK,
            json!({ "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }] }),
        )
        .await;
        let client = GeminiLLMClient::new("secret".to_string(), base_url);

        client
            .generate_content(GenerateContentParams {
                model: "text-model".to_string(),
                contents: vec![ContentPart::Text {
                    text: "find ghee".to_string(),
                }],
                config: GenerationConfig::grounded_search(),
            })
            .await
            .unwrap();

        let body = &seen.lock().unwrap()[0].body;
        assert!(body.get("generationConfig").is_none());
        assert!(body["tools"][0]["googleSearch"].is_object());
    }

    #[tokio::test]
    async fn test_generate_images_maps_predictions() {
        let (base_url, seen) = fixed(
            StatusCode::OK,
            json!({
                "predictions": [
                    { "bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/jpeg" },
                    { "raiFilteredReason": "blocked" }
                ]
            }),
        )
        .await;
        let client = GeminiLLMClient::new("secret".to_string(), base_url);

        let images = client
            .generate_images(GenerateImagesParams {
                model: "image-model".to_string(),
                prompt: "A bowl of dal".to_string(),
                config: ImageGenerationConfig {
                    number_of_images: 1,
                    output_mime_type: Some("image/jpeg".to_string()),
                    aspect_ratio: Some("16:9".to_string()),
                },
            })
            .await
            .unwrap();

        assert_eq!(images.len(), 1);
        assert_eq!(images[0].data_url("image/png"), "data:image/jpeg;base64,aGVsbG8=");

        let seen = seen.lock().unwrap();
        let Recorded { uri, body, .. } = &seen[0];
        assert_eq!(uri, "/models/image-model:predict?key=secret");
        assert_eq!(body["instances"][0]["prompt"], "A bowl of dal");
        assert_eq!(body["parameters"]["sampleCount"], 1);
        assert_eq!(body["parameters"]["aspectRatio"], "16:9");
        assert_eq!(body["parameters"]["outputOptions"]["mimeType"], "image/jpeg");
    }

    #[tokio::test]
    async fn test_error_status_is_external_service_error() {
        let (base_url, _) = fixed(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "quota" } }),
        )
        .await;
        let client = GeminiLLMClient::new("secret".to_string(), base_url);

        let err = client
            .generate_content(GenerateContentParams {
                model: "text-model".to_string(),
                contents: vec![ContentPart::Text {
                    text: "hi".to_string(),
                }],
                config: GenerationConfig::default(),
            })
            .await
            .unwrap_err();

        let CoreError::ExternalServiceError(message) = err else {
            panic!("expected external service error");
        };
        assert!(message.contains("429"));
        assert!(!message.contains("secret"));
    }
}
