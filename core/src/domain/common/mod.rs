use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod entities;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

#[derive(Clone, Debug)]
pub struct SavoraConfig {
    pub llm: LLMConfig,
    pub backend: Option<BackendConfig>,
    pub public: PublicConfig,
}

/// Provider credentials. Only ever constructed server side.
#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_base_url: String,
    pub text_model: String,
    pub image_model: String,
}

#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

/// Settings a client session needs: where the proxy lives and, optionally,
/// the hosted backend. No provider credential is carried here.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub proxy_endpoint: String,
    pub text_model: String,
    pub image_model: String,
    pub backend: Option<BackendConfig>,
}

/// Configuration that is safe to hand to a browser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfig {
    pub google_client_id: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
}

impl PublicConfig {
    pub fn backend(&self) -> Option<BackendConfig> {
        match (&self.supabase_url, &self.supabase_anon_key) {
            (Some(url), Some(anon_key)) if !url.is_empty() && !anon_key.is_empty() => {
                Some(BackendConfig {
                    url: url.clone(),
                    anon_key: anon_key.clone(),
                })
            }
            _ => None,
        }
    }
}

impl ClientConfig {
    pub fn from_public(proxy_endpoint: impl Into<String>, public: &PublicConfig) -> Self {
        Self {
            proxy_endpoint: proxy_endpoint.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            backend: public.backend(),
        }
    }
}
