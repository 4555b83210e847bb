use crate::{
    domain::{
        common::{BackendConfig, ClientConfig, LLMConfig},
        generation::services::AiFacade,
        kitchen::KitchenController,
        persistence::{Backend, PersistenceFacade},
        proxy::services::GenerationProxy,
    },
    infrastructure::{
        llm::{GeminiLLMClient, ProxyLLMClient},
        supabase::{
            SupabaseAuthRepository, SupabaseClient, SupabaseHistoryRepository,
            SupabaseProfileRepository, SupabaseSavedRecipeRepository,
        },
    },
};

pub type SavoraProxyService = GenerationProxy<GeminiLLMClient>;

pub type SupabasePersistence = PersistenceFacade<
    SupabaseAuthRepository,
    SupabaseProfileRepository,
    SupabaseHistoryRepository,
    SupabaseSavedRecipeRepository,
>;

pub type SavoraKitchen = KitchenController<
    AiFacade<ProxyLLMClient>,
    SupabaseAuthRepository,
    SupabaseProfileRepository,
    SupabaseHistoryRepository,
    SupabaseSavedRecipeRepository,
>;

/// Server side forwarder holding the provider credential.
pub fn create_proxy_service(config: &LLMConfig) -> SavoraProxyService {
    let llm_client = GeminiLLMClient::new(
        config.gemini_api_key.clone(),
        config.gemini_base_url.clone(),
    );

    GenerationProxy::new(
        llm_client,
        config.text_model.clone(),
        config.image_model.clone(),
    )
}

pub fn create_persistence(config: Option<&BackendConfig>) -> SupabasePersistence {
    let backend = config.map(|config| {
        // One client shared by every repository so they see the same session.
        let client = SupabaseClient::new(config);
        Backend {
            auth: SupabaseAuthRepository::new(client.clone()),
            profiles: SupabaseProfileRepository::new(client.clone()),
            history: SupabaseHistoryRepository::new(client.clone()),
            saved_recipes: SupabaseSavedRecipeRepository::new(client),
        }
    });

    PersistenceFacade::new(backend)
}

/// A client session talking to the generation endpoint at
/// `config.proxy_endpoint`.
pub fn create_kitchen(config: &ClientConfig) -> SavoraKitchen {
    let ai = AiFacade::new(
        ProxyLLMClient::new(config.proxy_endpoint.clone()),
        config.text_model.clone(),
        config.image_model.clone(),
    );

    KitchenController::new(ai, create_persistence(config.backend.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::{DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, PublicConfig};

    #[test]
    fn test_kitchen_without_backend_disables_persistence() {
        let config =
            ClientConfig::from_public("http://localhost:3333/api/gemini", &PublicConfig::default());
        let kitchen = create_kitchen(&config);

        assert!(!kitchen.persistence().is_configured());
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
    }

    #[test]
    fn test_backend_config_enables_persistence() {
        let persistence = create_persistence(Some(&BackendConfig {
            url: "https://project.supabase.co".to_string(),
            anon_key: "anon".to_string(),
        }));

        assert!(persistence.is_configured());
    }
}
