pub mod gemini_client;
pub mod proxy_client;

pub use gemini_client::GeminiLLMClient;
pub use proxy_client::ProxyLLMClient;
