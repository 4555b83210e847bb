use clap::Parser;
use savora_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_IMAGE_MODEL, DEFAULT_TEXT_MODEL, LLMConfig, PublicConfig,
    SavoraConfig,
};

#[derive(Clone, Parser)]
#[command(name = "savora-api")]
#[command(about = "Savora generation proxy and public configuration server")]
pub struct Args {
    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub public: PublicArgs,

    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

/// Provider settings. Carries the key, so no `Debug`.
#[derive(Clone, clap::Args)]
pub struct LlmArgs {
    #[arg(long = "api-key", env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long, env = "GEMINI_TEXT_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub gemini_text_model: String,

    #[arg(long, env = "GEMINI_IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL)]
    pub gemini_image_model: String,
}

#[derive(Debug, Clone, clap::Args)]
pub struct PublicArgs {
    #[arg(long, env = "GOOGLE_CLIENT_ID")]
    pub google_client_id: Option<String>,

    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_ANON_KEY")]
    pub supabase_anon_key: Option<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    /// Prefix for every route, e.g. `/savora`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, clap::Args)]
pub struct LogArgs {
    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<&PublicArgs> for PublicConfig {
    fn from(args: &PublicArgs) -> Self {
        Self {
            google_client_id: args.google_client_id.clone(),
            supabase_url: args.supabase_url.clone(),
            supabase_anon_key: args.supabase_anon_key.clone(),
        }
    }
}

impl From<Args> for SavoraConfig {
    fn from(args: Args) -> Self {
        let public = PublicConfig::from(&args.public);

        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.api_key,
                gemini_base_url: args.llm.gemini_base_url,
                text_model: args.llm.gemini_text_model,
                image_model: args.llm.gemini_image_model,
            },
            backend: public.backend(),
            public,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_origin_list() {
        let args = Args::try_parse_from([
            "savora-api",
            "--api-key",
            "secret",
            "--allowed-origins",
            "http://a.test,http://b.test",
        ])
        .unwrap();

        assert_eq!(args.server.port, 3333);
        assert_eq!(
            args.server.allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(args.llm.gemini_text_model, DEFAULT_TEXT_MODEL);
    }

    #[test]
    fn test_backend_is_configured_only_with_url_and_key() {
        let args = Args::try_parse_from([
            "savora-api",
            "--api-key",
            "secret",
            "--supabase-url",
            "https://project.supabase.co",
        ])
        .unwrap();

        let config = SavoraConfig::from(args);
        assert!(config.backend.is_none());
        assert_eq!(config.llm.gemini_api_key, "secret");
        assert_eq!(
            config.public.supabase_url.as_deref(),
            Some("https://project.supabase.co")
        );
    }
}
