//! Configuration resolution for dreamtell-api
//!
//! Provides ENV → TOML priority resolution for the story API key and CORS
//! origins, plus story client construction from the loaded config.

use dreamtell_common::config::TomlConfig;
use dreamtell_common::{Error, Result};
use tracing::{info, warn};

use crate::services::story_client::StoryClient;

/// Environment variable carrying the story API key
pub const LLM_API_KEY_ENV: &str = "DREAMTELL_LLM_API_KEY";

/// Environment variable carrying comma-separated CORS origins
pub const CORS_ORIGINS_ENV: &str = "DREAMTELL_CORS_ORIGINS";

/// Resolve the story API key.
///
/// **Priority:** ENV → TOML
pub fn resolve_llm_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(LLM_API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .llm_api_key
        .clone()
        .filter(|k| is_valid_key(k));

    // Warn if multiple sources (potential misconfiguration)
    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Story API key found in both environment and TOML config. \
             Using environment (highest priority)."
        );
    }

    if let Some(key) = env_key {
        info!("Story API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Story API key loaded from TOML config");
        return Ok(key);
    }

    Err(Error::Config(
        "Story API key not configured. Please configure using one of:\n\
         1. Environment: DREAMTELL_LLM_API_KEY=your-key-here\n\
         2. TOML config: ~/.config/dreamtell/dreamtell.toml (llm_api_key = \"your-key\")"
            .to_string(),
    ))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Build the story client, applying base URL and model overrides from config
pub fn build_story_client(api_key: String, toml_config: &TomlConfig) -> Result<StoryClient> {
    let mut client = StoryClient::new(api_key)
        .map_err(|e| Error::Config(format!("Failed to create story client: {}", e)))?;

    if let Some(base_url) = &toml_config.llm_base_url {
        client = client.with_base_url(base_url);
    }
    if let Some(model) = &toml_config.llm_model {
        client = client.with_model(model);
    }

    Ok(client)
}

/// Resolve allowed CORS origins.
///
/// **Priority:** ENV (comma-separated) → TOML → `*`
pub fn resolve_cors_origins(toml_config: &TomlConfig) -> Vec<String> {
    if let Ok(origins) = std::env::var(CORS_ORIGINS_ENV) {
        let origins: Vec<String> = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if !origins.is_empty() {
            return origins;
        }
    }

    if let Some(origins) = &toml_config.cors_origins {
        if !origins.is_empty() {
            return origins.clone();
        }
    }

    vec!["*".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn key_validation() {
        assert!(is_valid_key("sk-test"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }

    #[test]
    #[serial]
    fn api_key_env_beats_toml() {
        std::env::set_var(LLM_API_KEY_ENV, "sk-from-env");
        let config = TomlConfig {
            llm_api_key: Some("sk-from-toml".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_llm_api_key(&config).unwrap(), "sk-from-env");

        std::env::remove_var(LLM_API_KEY_ENV);
    }

    #[test]
    #[serial]
    fn api_key_falls_back_to_toml_then_errors() {
        std::env::remove_var(LLM_API_KEY_ENV);

        let config = TomlConfig {
            llm_api_key: Some("sk-from-toml".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_llm_api_key(&config).unwrap(), "sk-from-toml");

        assert!(resolve_llm_api_key(&TomlConfig::default()).is_err());
    }

    #[test]
    #[serial]
    fn cors_origins_env_splits_on_commas() {
        std::env::set_var(CORS_ORIGINS_ENV, "https://a.example.com, https://b.example.com");

        let origins = resolve_cors_origins(&TomlConfig::default());
        assert_eq!(
            origins,
            vec![
                "https://a.example.com".to_string(),
                "https://b.example.com".to_string()
            ]
        );

        std::env::remove_var(CORS_ORIGINS_ENV);
    }

    #[test]
    #[serial]
    fn cors_origins_default_to_wildcard() {
        std::env::remove_var(CORS_ORIGINS_ENV);
        assert_eq!(resolve_cors_origins(&TomlConfig::default()), vec!["*".to_string()]);
    }

    #[test]
    #[serial]
    fn story_client_overrides_from_toml() {
        let config = TomlConfig {
            llm_model: Some("gpt-4o".to_string()),
            llm_base_url: Some("http://127.0.0.1:9/v1".to_string()),
            ..Default::default()
        };

        let client = build_story_client("sk-test".to_string(), &config).unwrap();
        assert_eq!(client.model(), "gpt-4o");
    }
}
