use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tracing::error;

use crate::domain::common::{BackendConfig, entities::app_errors::CoreError};

pub const RETURN_REPRESENTATION: &str = "return=representation";

/// Shared connection to the hosted backend. Clones share the session token,
/// so every repository acts as the signed in user once auth succeeds.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    base_url: String,
    anon_key: String,
    http: Client,
    access_token: Arc<RwLock<Option<String>>>,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            http: Client::new(),
            access_token: Arc::default(),
        }
    }

    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    pub async fn has_session(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// Starts a request carrying the project key and the session bearer, or
    /// the anon key before sign in.
    pub async fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone());

        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }

    pub async fn send_json<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<R, CoreError> {
        let response = self.send(request, operation).await?;
        response.json().await.map_err(|e| {
            error!("Failed to parse backend response to {}: {}", operation, e);
            CoreError::ExternalServiceError(e.to_string())
        })
    }

    pub async fn send(&self, request: RequestBuilder, operation: &str) -> Result<Response, CoreError> {
        let response = request.send().await.map_err(|e| {
            error!("Backend request to {} failed: {}", operation, e);
            CoreError::ExternalServiceError(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Backend error on {}: {} - {}", operation, status, error_text);
            return Err(CoreError::ExternalServiceError(format!(
                "{} - {}",
                status, error_text
            )));
        }

        Ok(response)
    }
}

/// PostgREST equality filter value.
pub fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}
