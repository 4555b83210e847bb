use reqwest::Method;
use serde_json::json;
use tracing::warn;

use crate::{
    domain::{
        account::{entities::AuthSession, ports::AuthRepository},
        common::entities::app_errors::CoreError,
    },
    infrastructure::supabase::{client::SupabaseClient, mappers::SessionResponse},
};

#[derive(Debug, Clone)]
pub struct SupabaseAuthRepository {
    pub client: SupabaseClient,
}

impl SupabaseAuthRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl AuthRepository for SupabaseAuthRepository {
    async fn sign_in_with_id_token(
        &self,
        provider: String,
        id_token: String,
    ) -> Result<AuthSession, CoreError> {
        let url = self.client.auth_url("token");
        let request = self
            .client
            .request(Method::POST, &url)
            .await
            .query(&[("grant_type", "id_token")])
            .json(&json!({ "provider": provider, "id_token": id_token }));

        let session: SessionResponse = self
            .client
            .send_json(request, "exchange id token")
            .await
            .map_err(|e| CoreError::AuthFailure(e.to_string()))?;

        let session = AuthSession::from(session);
        self.client
            .set_access_token(Some(session.access_token.clone()))
            .await;
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        if !self.client.has_session().await {
            return Ok(());
        }

        let url = self.client.auth_url("logout");
        let request = self.client.request(Method::POST, &url).await;
        let result = self.client.send(request, "sign out").await;

        // The local session ends whether or not the backend heard about it.
        self.client.set_access_token(None).await;

        result.map(|_| ()).map_err(|e| {
            warn!("Backend sign out failed: {}", e);
            CoreError::AuthFailure(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::{domain::common::BackendConfig, infrastructure::stub::fixed};

    fn session_body() -> serde_json::Value {
        json!({
            "access_token": "user-jwt",
            "refresh_token": "refresh",
            "expires_in": 3600,
            "user": {
                "id": "0b6f3c7e-5a57-4a43-9d6f-2f1d6c1d8a11",
                "email": "cook@example.com",
                "user_metadata": { "name": "Asha" }
            }
        })
    }

    fn client(url: String) -> SupabaseClient {
        SupabaseClient::new(&BackendConfig {
            url,
            anon_key: "anon".to_string(),
        })
    }

    #[tokio::test]
    async fn test_sign_in_exchanges_token_and_keeps_session() {
        let (url, seen) = fixed(StatusCode::OK, session_body()).await;
        let repository = SupabaseAuthRepository::new(client(url));

        let session = repository
            .sign_in_with_id_token("google".to_string(), "google-jwt".to_string())
            .await
            .unwrap();

        assert_eq!(session.user.name.as_deref(), Some("Asha"));
        assert!(repository.client.has_session().await);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].uri, "/auth/v1/token?grant_type=id_token");
        assert_eq!(seen[0].header("apikey"), Some("anon"));
        assert_eq!(seen[0].header("authorization"), Some("Bearer anon"));
        assert_eq!(seen[0].body["provider"], "google");
        assert_eq!(seen[0].body["id_token"], "google-jwt");
    }

    #[tokio::test]
    async fn test_rejected_token_is_auth_failure() {
        let (url, _) = fixed(
            StatusCode::BAD_REQUEST,
            json!({ "error": "invalid_grant" }),
        )
        .await;
        let repository = SupabaseAuthRepository::new(client(url));

        let err = repository
            .sign_in_with_id_token("google".to_string(), "bad".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::AuthFailure(_)));
        assert!(!repository.client.has_session().await);
    }

    #[tokio::test]
    async fn test_sign_out_uses_session_bearer_and_clears_it() {
        let (url, seen) = fixed(StatusCode::OK, session_body()).await;
        let repository = SupabaseAuthRepository::new(client(url));
        repository
            .sign_in_with_id_token("google".to_string(), "google-jwt".to_string())
            .await
            .unwrap();

        repository.sign_out().await.unwrap();

        assert!(!repository.client.has_session().await);
        let seen = seen.lock().unwrap();
        assert_eq!(seen[1].method, Method::POST);
        assert_eq!(seen[1].uri, "/auth/v1/logout");
        assert_eq!(seen[1].header("authorization"), Some("Bearer user-jwt"));
    }
}
