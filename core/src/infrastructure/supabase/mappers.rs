use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    account::entities::{AuthSession, UserProfile},
    history::{entities::HistoryItem, value_objects::HistoryParams},
    recipe::entities::Recipe,
};

/// Row ids come back as numbers from identity columns and as strings from
/// uuid columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowId::Int(id) => write!(f, "{}", id),
            RowId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdRow {
    pub id: RowId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            picture: row.picture,
        }
    }
}

impl From<UserProfile> for ProfileRow {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            picture: profile.picture,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryRow {
    pub id: RowId,
    pub created_at: DateTime<Utc>,
    pub mode: String,
    pub display_title: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct HistoryInsert<'a> {
    pub user_id: Uuid,
    pub mode: &'a str,
    pub display_title: &'a str,
    pub params: &'a HistoryParams,
}

impl TryFrom<HistoryRow> for HistoryItem {
    type Error = serde_json::Error;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            params: HistoryParams::from_stored(&row.mode, row.params)?,
            id: row.id.to_string(),
            created_at: row.created_at,
            display_title: row.display_title,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct SavedRecipeRow {
    pub id: RowId,
    pub recipe_data: Value,
}

#[derive(Debug, Serialize)]
pub struct SavedRecipeInsert<'a> {
    pub user_id: Uuid,
    pub recipe_data: &'a Recipe,
}

impl TryFrom<SavedRecipeRow> for Recipe {
    type Error = serde_json::Error;

    fn try_from(row: SavedRecipeRow) -> Result<Self, Self::Error> {
        let mut recipe: Recipe = serde_json::from_value(row.recipe_data)?;
        recipe.mark_saved(row.id.to_string());
        Ok(recipe)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UserMetadata {
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

impl From<SessionResponse> for AuthSession {
    fn from(session: SessionResponse) -> Self {
        let metadata = session.user.user_metadata;
        Self {
            access_token: session.access_token,
            refresh_token: session.refresh_token,
            expires_at: session
                .expires_in
                .map(|seconds| Utc::now() + Duration::seconds(seconds)),
            user: UserProfile {
                id: session.user.id,
                name: metadata.full_name.or(metadata.name),
                email: session.user.email,
                picture: metadata.picture.or(metadata.avatar_url),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::kitchen::value_objects::Mode;

    #[test]
    fn test_row_id_accepts_numbers_and_strings() {
        let numeric: IdRow = serde_json::from_value(json!({ "id": 42 })).unwrap();
        let text: IdRow = serde_json::from_value(json!({ "id": "abc" })).unwrap();
        assert_eq!(numeric.id.to_string(), "42");
        assert_eq!(text.id.to_string(), "abc");
    }

    #[test]
    fn test_history_row_uses_mode_column() {
        let row: HistoryRow = serde_json::from_value(json!({
            "id": 7,
            "user_id": "0b6f3c7e-5a57-4a43-9d6f-2f1d6c1d8a11",
            "created_at": "2025-03-01T10:00:00.123456+00:00",
            "mode": "rescue",
            "display_title": "Rescue plan for: Curry",
            "params": { "rescueDishName": "Curry", "rescueProblem": "Too salty" }
        }))
        .unwrap();

        let item = HistoryItem::try_from(row).unwrap();
        assert_eq!(item.id, "7");
        assert_eq!(item.mode(), Mode::Rescue);
        assert_eq!(item.display_title, "Rescue plan for: Curry");
    }

    #[test]
    fn test_saved_row_is_marked_saved() {
        let row = SavedRecipeRow {
            id: RowId::Int(3),
            recipe_data: json!({
                "name": "Dal",
                "description": "Lentils",
                "prepTime": "5 mins",
                "cookTime": "20 mins",
                "servings": "2 servings",
                "ingredients": [],
                "instructions": ["Boil"]
            }),
        };

        let recipe = Recipe::try_from(row).unwrap();
        assert!(recipe.is_saved);
        assert_eq!(recipe.id.as_deref(), Some("3"));
    }

    #[test]
    fn test_session_prefers_full_name_and_picture() {
        let session: SessionResponse = serde_json::from_value(json!({
            "access_token": "jwt",
            "expires_in": 3600,
            "user": {
                "id": "0b6f3c7e-5a57-4a43-9d6f-2f1d6c1d8a11",
                "email": "cook@example.com",
                "user_metadata": { "full_name": "Asha Rao", "avatar_url": "https://img" }
            }
        }))
        .unwrap();

        let session = AuthSession::from(session);
        assert_eq!(session.user.name.as_deref(), Some("Asha Rao"));
        assert_eq!(session.user.picture.as_deref(), Some("https://img"));
        assert!(session.expires_at.unwrap() > Utc::now());
    }
}
