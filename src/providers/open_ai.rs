use crate::config::ProviderConfig;
use crate::providers::{RecommendationProvider, RECOMMENDER_SYSTEM_PROMPT};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, Box<dyn Error>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| "https://api.openai.com".to_string());

        Ok(OpenAiProvider {
            client: Client::new(),
            api_key,
            base_url,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    /// Create a new OpenAI provider with simple parameters
    pub fn with_api_key(api_key: String, model: String) -> Self {
        OpenAiProvider {
            client: Client::new(),
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model,
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAiProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 800,
        }
    }
}

#[async_trait]
impl RecommendationProvider for OpenAiProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn recommend(&self, prompt: &str) -> Result<String, Box<dyn Error>> {
        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": RECOMMENDER_SYSTEM_PROMPT},
                    {"role": "user", "content": prompt}
                ],
                "temperature": self.temperature,
                "max_tokens": self.max_tokens
            }))
            .send()
            .await?;

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let content = response_body["choices"][0]["message"]["content"]
            .as_str()
            .ok_or("Failed to extract content from response")?
            .to_string();

        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_recommend() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{
                        "message": {
                            "content": "[{\"food\": \"Za'atar\", \"reason\": \"Herb blend\", \"mechanism\": \"Antioxidants\", \"nutrients\": [\"iron\"]}]"
                        }
                    }]
                }"#,
            )
            .create();

        let provider = OpenAiProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4.1-mini".to_string(),
        );

        let result = provider.recommend("recommend 1 food").await.unwrap();
        assert!(result.contains("Za'atar"));
        mock.assert();
    }

    #[tokio::test]
    async fn test_recommend_api_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/chat/completions")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Invalid request"}"#)
            .create();

        let provider = OpenAiProvider::with_base_url(
            "fake_api_key".to_string(),
            server.url(),
            "gpt-4.1-mini".to_string(),
        );

        let result = provider.recommend("recommend 1 food").await;
        assert!(result.is_err());
        mock.assert();
    }

    #[tokio::test]
    async fn test_provider_name() {
        let provider =
            OpenAiProvider::with_api_key("fake_api_key".to_string(), "gpt-4.1-mini".to_string());
        assert_eq!(provider.provider_name(), "openai");
    }
}
