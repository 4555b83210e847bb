use reqwest::Method;
use tracing::warn;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        history::{
            entities::{HistoryItem, NewHistoryItem},
            ports::HistoryRepository,
        },
    },
    infrastructure::supabase::{
        client::{RETURN_REPRESENTATION, SupabaseClient, eq},
        mappers::{HistoryInsert, HistoryRow},
    },
};

const TABLE: &str = "history_items";

#[derive(Debug, Clone)]
pub struct SupabaseHistoryRepository {
    pub client: SupabaseClient,
}

impl SupabaseHistoryRepository {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

impl HistoryRepository for SupabaseHistoryRepository {
    async fn list(&self, user_id: Uuid, limit: usize) -> Result<Vec<HistoryItem>, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self.client.request(Method::GET, &url).await.query(&[
            ("select", "*".to_string()),
            ("user_id", eq(user_id)),
            ("order", "created_at.desc".to_string()),
            ("limit", limit.to_string()),
        ]);

        let rows: Vec<HistoryRow> = self.client.send_json(request, "fetch history").await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id.to_string();
                HistoryItem::try_from(row)
                    .map_err(|e| warn!("Skipping unreadable history item {}: {}", id, e))
                    .ok()
            })
            .collect())
    }

    async fn append(&self, user_id: Uuid, item: NewHistoryItem) -> Result<HistoryItem, CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::POST, &url)
            .await
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&HistoryInsert {
                user_id,
                mode: item.params.mode().as_str(),
                display_title: &item.display_title,
                params: &item.params,
            });

        let rows: Vec<HistoryRow> = self.client.send_json(request, "add history").await?;
        let row = rows.into_iter().next().ok_or(CoreError::NotFound)?;

        HistoryItem::try_from(row).map_err(|e| {
            warn!("Stored history item could not be read back: {}", e);
            CoreError::Invalid
        })
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), CoreError> {
        let url = self.client.rest_url(TABLE);
        let request = self
            .client
            .request(Method::DELETE, &url)
            .await
            .query(&[("user_id", eq(user_id))]);

        self.client.send(request, "clear history").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use super::*;
    use crate::{
        domain::{common::BackendConfig, history::value_objects::HistoryParams},
        infrastructure::stub::fixed,
    };

    const USER: &str = "0b6f3c7e-5a57-4a43-9d6f-2f1d6c1d8a11";

    fn repository(url: String) -> SupabaseHistoryRepository {
        SupabaseHistoryRepository::new(SupabaseClient::new(&BackendConfig {
            url,
            anon_key: "anon".to_string(),
        }))
    }

    #[tokio::test]
    async fn test_list_orders_limits_and_skips_bad_rows() {
        let (url, seen) = fixed(
            StatusCode::OK,
            json!([
                {
                    "id": 2,
                    "created_at": "2025-03-02T10:00:00+00:00",
                    "mode": "vision",
                    "display_title": "Calorie Vision Analysis",
                    "params": { "visionUserContext": "" }
                },
                {
                    "id": 1,
                    "created_at": "2025-03-01T10:00:00+00:00",
                    "mode": "menu",
                    "display_title": "Broken",
                    "params": { "eventType": "Party" }
                }
            ]),
        )
        .await;

        let items = repository(url)
            .list(USER.parse().unwrap(), 10)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
        assert_eq!(
            seen.lock().unwrap()[0].uri,
            format!(
                "/rest/v1/history_items?select=*&user_id=eq.{}&order=created_at.desc&limit=10",
                USER
            )
        );
    }

    #[tokio::test]
    async fn test_append_sends_mode_title_and_params() {
        let (url, seen) = fixed(
            StatusCode::CREATED,
            json!([{
                "id": 9,
                "created_at": "2025-03-02T10:00:00+00:00",
                "mode": "rescue",
                "display_title": "Rescue plan for: Curry",
                "params": { "mode": "rescue", "rescueDishName": "Curry", "rescueProblem": "Too salty" }
            }]),
        )
        .await;

        let item = repository(url)
            .append(
                USER.parse().unwrap(),
                NewHistoryItem {
                    display_title: "Rescue plan for: Curry".to_string(),
                    params: HistoryParams::Rescue {
                        rescue_dish_name: "Curry".to_string(),
                        rescue_problem: "Too salty".to_string(),
                    },
                },
            )
            .await
            .unwrap();

        assert_eq!(item.id, "9");
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::POST);
        assert_eq!(seen[0].body["user_id"], USER);
        assert_eq!(seen[0].body["mode"], "rescue");
        assert_eq!(seen[0].body["params"]["rescueDishName"], "Curry");
    }

    #[tokio::test]
    async fn test_clear_deletes_by_user() {
        let (url, seen) = fixed(StatusCode::NO_CONTENT, json!(null)).await;

        repository(url).clear(USER.parse().unwrap()).await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].method, Method::DELETE);
        assert_eq!(
            seen[0].uri,
            format!("/rest/v1/history_items?user_id=eq.{}", USER)
        );
    }
}
