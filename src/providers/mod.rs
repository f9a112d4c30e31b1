mod anthropic;
mod factory;
mod ollama;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use ollama::OllamaProvider;
pub use open_ai::OpenAiProvider;
pub use prompt::{build_recommender_prompt, RECOMMENDER_SYSTEM_PROMPT};

use async_trait::async_trait;
use std::error::Error;

/// Unified trait for all generative text providers
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send one recommendation request and return the raw model text
    async fn recommend(&self, prompt: &str) -> Result<String, Box<dyn Error>>;
}
