use tokio::sync::RwLock;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    account::{
        entities::UserProfile,
        ports::{AuthRepository, ProfileRepository},
    },
    common::entities::app_errors::CoreError,
    history::{
        entities::{HISTORY_LIMIT, HistoryItem, NewHistoryItem},
        ports::HistoryRepository,
    },
    recipe::entities::Recipe,
    saved_recipe::ports::SavedRecipeRepository,
};

pub const ID_TOKEN_PROVIDER: &str = "google";

/// The repositories of a configured hosted backend.
#[derive(Debug, Clone)]
pub struct Backend<A, P, H, S> {
    pub auth: A,
    pub profiles: P,
    pub history: H,
    pub saved_recipes: S,
}

/// CRUD against the hosted backend for the signed in user.
///
/// Mutations return `Ok(None)` / `Ok(false)` without touching the backend when
/// it is not configured or nobody is signed in as `user_id`.
#[derive(Debug)]
pub struct PersistenceFacade<A, P, H, S> {
    backend: Option<Backend<A, P, H, S>>,
    current_user: RwLock<Option<Uuid>>,
}

impl<A, P, H, S> PersistenceFacade<A, P, H, S>
where
    A: AuthRepository,
    P: ProfileRepository,
    H: HistoryRepository,
    S: SavedRecipeRepository,
{
    pub fn new(backend: Option<Backend<A, P, H, S>>) -> Self {
        if backend.is_none() {
            warn!("Backend configuration not found. Persistence features are disabled.");
        }

        Self {
            backend,
            current_user: RwLock::new(None),
        }
    }

    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    pub async fn current_user(&self) -> Option<Uuid> {
        *self.current_user.read().await
    }

    /// Backend handle if `user_id` is the signed in user.
    async fn authorized(&self, user_id: Uuid) -> Option<&Backend<A, P, H, S>> {
        let backend = self.backend.as_ref()?;
        match *self.current_user.read().await {
            Some(current) if current == user_id => Some(backend),
            Some(_) => {
                warn!("Ignoring persistence call for user {} who is not signed in", user_id);
                None
            }
            None => None,
        }
    }

    pub async fn sign_in_with_external_token(&self, token: String) -> Result<UserProfile, CoreError> {
        let backend = self.backend.as_ref().ok_or_else(|| {
            error!("Sign in attempted without a configured backend");
            CoreError::AuthFailure("backend is not configured".to_string())
        })?;

        let session = backend
            .auth
            .sign_in_with_id_token(ID_TOKEN_PROVIDER.to_string(), token)
            .await
            .map_err(|e| {
                error!("Failed to sign in with id token: {}", e);
                CoreError::AuthFailure(e.to_string())
            })?;

        let user_id = session.user.id;
        *self.current_user.write().await = Some(user_id);
        info!("User {} signed in", user_id);

        let profile = match self.fetch_profile(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => backend
                .profiles
                .upsert_profile(session.user.clone())
                .await
                .unwrap_or_else(|e| {
                    warn!("Failed to create profile for {}: {}", user_id, e);
                    session.user.clone()
                }),
            Err(_) => session.user.clone(),
        };

        Ok(profile)
    }

    /// Ends the session locally even if the backend call fails.
    pub async fn sign_out(&self) {
        let previous = self.current_user.write().await.take();

        if let (Some(backend), Some(user_id)) = (self.backend.as_ref(), previous) {
            match backend.auth.sign_out().await {
                Ok(()) => info!("User {} signed out", user_id),
                Err(e) => error!("Failed to sign out {}: {}", user_id, e),
            }
        }
    }

    pub async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(None);
        };

        backend.profiles.get_profile(user_id).await.map_err(|e| {
            error!("Failed to fetch profile: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })
    }

    pub async fn update_profile_name(
        &self,
        user_id: Uuid,
        name: String,
    ) -> Result<Option<UserProfile>, CoreError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(CoreError::Validation("name must not be empty".to_string()));
        }

        let Some(backend) = self.authorized(user_id).await else {
            return Ok(None);
        };

        backend
            .profiles
            .update_name(user_id, name)
            .await
            .map(Some)
            .map_err(|e| {
                error!("Failed to update name: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })
    }

    /// Newest first, at most [`HISTORY_LIMIT`] entries.
    pub async fn list_history(&self, user_id: Uuid) -> Result<Vec<HistoryItem>, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(Vec::new());
        };

        let mut items = backend
            .history
            .list(user_id, HISTORY_LIMIT)
            .await
            .map_err(|e| {
                error!("Failed to fetch history: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(HISTORY_LIMIT);
        Ok(items)
    }

    pub async fn append_history(
        &self,
        user_id: Uuid,
        item: NewHistoryItem,
    ) -> Result<Option<HistoryItem>, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(None);
        };

        backend
            .history
            .append(user_id, item)
            .await
            .map(Some)
            .map_err(|e| {
                error!("Failed to add history: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })
    }

    pub async fn clear_history(&self, user_id: Uuid) -> Result<bool, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(false);
        };

        backend.history.clear(user_id).await.map_err(|e| {
            error!("Failed to clear history: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })?;

        Ok(true)
    }

    /// Persists the recipe content without its saved flag or record id.
    pub async fn save_recipe(
        &self,
        user_id: Uuid,
        recipe: &Recipe,
    ) -> Result<Option<String>, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(None);
        };

        backend
            .saved_recipes
            .save(user_id, recipe.without_ui_state())
            .await
            .map(Some)
            .map_err(|e| {
                error!("Failed to save recipe: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })
    }

    pub async fn unsave_recipe(&self, user_id: Uuid, record_id: String) -> Result<bool, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(false);
        };

        backend
            .saved_recipes
            .delete(record_id)
            .await
            .map_err(|e| {
                error!("Failed to unsave recipe: {}", e);
                CoreError::PersistenceFailure(e.to_string())
            })?;

        Ok(true)
    }

    pub async fn list_saved_recipes(&self, user_id: Uuid) -> Result<Vec<Recipe>, CoreError> {
        let Some(backend) = self.authorized(user_id).await else {
            return Ok(Vec::new());
        };

        backend.saved_recipes.list(user_id).await.map_err(|e| {
            error!("Failed to fetch saved recipes: {}", e);
            CoreError::PersistenceFailure(e.to_string())
        })
    }
}
