use tracing::{error, info};

use crate::domain::{
    common::entities::app_errors::CoreError,
    generation::ports::LLMClient,
    proxy::{
        ports::ProxyService,
        value_objects::{ProxyRequest, ProxyResponse},
    },
};

/// Stateless forwarder holding the server side provider client.
#[derive(Debug, Clone)]
pub struct GenerationProxy<LLM> {
    llm_client: LLM,
    default_text_model: String,
    default_image_model: String,
}

impl<LLM> GenerationProxy<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM, default_text_model: String, default_image_model: String) -> Self {
        Self {
            llm_client,
            default_text_model,
            default_image_model,
        }
    }
}

impl<LLM> ProxyService for GenerationProxy<LLM>
where
    LLM: LLMClient,
{
    async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse, CoreError> {
        let action = request.action();

        let result = match request {
            ProxyRequest::GenerateContent(mut params) => {
                if params.model.trim().is_empty() {
                    params.model = self.default_text_model.clone();
                }
                info!("Forwarding {} to model {}", action, params.model);
                self.llm_client
                    .generate_content(params)
                    .await
                    .map(ProxyResponse::Content)
            }
            ProxyRequest::GenerateImages(mut params) => {
                if params.model.trim().is_empty() {
                    params.model = self.default_image_model.clone();
                }
                info!("Forwarding {} to model {}", action, params.model);
                self.llm_client
                    .generate_images(params)
                    .await
                    .map(ProxyResponse::Images)
            }
        };

        result.map_err(|e| {
            error!("Failed to forward {} request: {}", action, e);
            CoreError::ExternalServiceError(e.to_string())
        })
    }
}
