use reqwest::Method;
use serde_json::json;
use uuid::Uuid;

use crate::{
    domain::{
        account::{entities::UserProfile, ports::ProfileRepository},
        common::entities::app_errors::CoreError,
    },
    infrastructure::supabase::{
        client::{RETURN_REPRESENTATION, SupabaseClient, eq},
        mappers::ProfileRow,
    },
};

const TABLE: &str = "profiles";

#[derive(Debug, Clone)]
pub struct SupabaseProfileRepository {
    pub client: SupabaseClient,
}

impl SupabaseProfileRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl ProfileRepository for SupabaseProfileRepository {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::GET, &url)
            .await
            .query(&[("select", "*".to_string()), ("id", eq(user_id))]);

        let rows: Vec<ProfileRow> = self.client.send_json(request, "fetch profile").await?;
        Ok(rows.into_iter().next().map(UserProfile::from))
    }

    async fn upsert_profile(&self, profile: UserProfile) -> Result<UserProfile, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::POST, &url)
            .await
            .header(
                "Prefer",
                format!("resolution=merge-duplicates,{}", RETURN_REPRESENTATION),
            )
            .json(&ProfileRow::from(profile.clone()));

        let rows: Vec<ProfileRow> = self.client.send_json(request, "upsert profile").await?;
        Ok(rows
            .into_iter()
            .next()
            .map(UserProfile::from)
            .unwrap_or(profile))
    }

    async fn update_name(&self, user_id: Uuid, name: String) -> Result<UserProfile, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::PATCH, &url)
            .await
            .query(&[("id", eq(user_id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&json!({ "name": name }));

        let rows: Vec<ProfileRow> = self.client.send_json(request, "update name").await?;
        rows.into_iter()
            .next()
            .map(UserProfile::from)
            .ok_or(CoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::{domain::common::BackendConfig, infrastructure::stub::fixed};

    const USER: &str = "0b6f3c7e-5a57-4a43-9d6f-2f1d6c1d8a11";

    fn repository(url: String) -> SupabaseProfileRepository {
        SupabaseProfileRepository::new(SupabaseClient::new(&BackendConfig {
            url,
            anon_key: "anon".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_get_profile_filters_by_id() {
        let (url, seen) = fixed(
            StatusCode::OK,
            json!([{ "id": USER, "name": null, "email": "cook@example.com" }]),
        )
        .await;
        let user_id: Uuid = USER.parse().unwrap();

        let profile = repository(url).get_profile(user_id).await.unwrap().unwrap();

        assert!(profile.needs_name());
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::GET);
        assert_eq!(seen[0].uri, format!("/rest/v1/profiles?select=*&id=eq.{}", USER));
    }

    #[tokio::test]
    async fn test_missing_profile_is_none() {
        let (url, _) = fixed(StatusCode::OK, json!([])).await;
        let profile = repository(url).get_profile(Uuid::new_v4()).await.unwrap();
        assert_eq!(profile, None);
    }

    #[tokio::test]
    async fn test_update_name_patches_and_returns_row() {
        let (url, seen) = fixed(StatusCode::OK, json!([{ "id": USER, "name": "Meera" }])).await;

        let profile = repository(url)
            .update_name(USER.parse().unwrap(), "Meera".to_string())
            .await
            .unwrap();

        assert_eq!(profile.name.as_deref(), Some("Meera"));
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::PATCH);
        assert_eq!(seen[0].header("prefer"), Some("return=representation"));
        assert_eq!(seen[0].body, json!({ "name": "Meera" }));
    }
}
