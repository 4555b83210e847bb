use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// True until the user has supplied a display name.
    pub fn needs_name(&self) -> bool {
        self.name.as_deref().is_none_or(|name| name.trim().is_empty())
    }
}

/// Tokens and identity returned by the hosted auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_name() {
        let mut profile = UserProfile {
            id: Uuid::new_v4(),
            name: None,
            email: Some("cook@example.com".to_string()),
            picture: None,
        };
        assert!(profile.needs_name());

        profile.name = Some("  ".to_string());
        assert!(profile.needs_name());

        profile.name = Some("Asha".to_string());
        assert!(!profile.needs_name());
    }
}
