use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds for the generative call
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Path to the food reference table CSV
    #[serde(default = "default_reference_table")]
    pub reference_table: String,
}

/// Configuration for a specific generative text provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4.1-mini", "claude-3-5-sonnet-20250929")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            reference_table: default_reference_table(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    800
}

fn default_timeout() -> u64 {
    30
}

fn default_reference_table() -> String {
    "data/foods.csv".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with NUTRITION__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: NUTRITION__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: NUTRITION__PROVIDERS__OPENAI__API_KEY
            .add_source(
                Environment::with_prefix("NUTRITION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.7);
        assert_eq!(default_max_tokens(), 800);
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_reference_table(), "data/foods.csv");
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, "openai");
        assert!(config.providers.is_empty());
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_provider_config_has_optional_fields() {
        let config = ProviderConfig {
            enabled: true,
            model: "gpt-4.1-mini".to_string(),
            temperature: 0.7,
            max_tokens: 800,
            api_key: None,
            base_url: None,
        };

        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }

    #[test]
    fn test_app_config_structure() {
        let mut providers = HashMap::new();
        providers.insert(
            "openai".to_string(),
            ProviderConfig {
                enabled: true,
                model: "gpt-4.1-mini".to_string(),
                temperature: 0.7,
                max_tokens: 800,
                api_key: Some("test-key".to_string()),
                base_url: None,
            },
        );

        let config = AppConfig {
            default_provider: "openai".to_string(),
            providers,
            timeout: default_timeout(),
            reference_table: default_reference_table(),
        };

        assert_eq!(config.default_provider, "openai");
        assert_eq!(config.providers.len(), 1);
        assert!(config.providers.contains_key("openai"));
    }
}
