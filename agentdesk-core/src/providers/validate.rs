//! Structural validation run before a provider is saved.

use super::config::ProviderConfig;
use super::types::{default_display_name, ProviderType, ValidationError};

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validate a provider's working copy. The first failing rule is returned.
pub fn validate(provider_id: &str, config: &ProviderConfig) -> Result<(), ValidationError> {
    let display = || default_display_name(provider_id);
    let provider_type = config.provider_type;

    if provider_type == ProviderType::CustomOpenAI && config.name.chars().any(char::is_whitespace) {
        return Err(ValidationError::NameContainsSpaces);
    }
    if provider_type.requires_base_url() && is_blank(&config.base_url) {
        return Err(ValidationError::BaseUrlRequired(display()));
    }

    match provider_type {
        ProviderType::AzureOpenAI => {
            if is_blank(&config.api_key) {
                return Err(ValidationError::ApiKeyRequired(display()));
            }
            if config.azure_deployment_names.is_empty() {
                return Err(ValidationError::DeploymentRequired(display()));
            }
            if is_blank(&config.azure_api_version) {
                return Err(ValidationError::ApiVersionRequired(display()));
            }
            Ok(())
        }
        ProviderType::OpenAI
        | ProviderType::Anthropic
        | ProviderType::DeepSeek
        | ProviderType::Gemini
        | ProviderType::Grok
        | ProviderType::Ollama
        | ProviderType::OpenRouter
        | ProviderType::Groq
        | ProviderType::Cerebras
        | ProviderType::Llama
        | ProviderType::CustomOpenAI => Ok(()),
    }
}

/// Whether the form holds enough input to enable the save action.
///
/// This is softer than [`validate`]: it only looks at the fields the user
/// must fill in, and does not check the modified state.
pub fn has_enough_input(config: &ProviderConfig) -> bool {
    match config.provider_type {
        ProviderType::CustomOpenAI | ProviderType::Ollama => !is_blank(&config.base_url),
        ProviderType::AzureOpenAI => {
            !is_blank(&config.api_key)
                && !is_blank(&config.base_url)
                && !config.azure_deployment_names.is_empty()
                && !is_blank(&config.azure_api_version)
        }
        _ => !is_blank(&config.api_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(name: &str, base_url: &str) -> ProviderConfig {
        let mut config = ProviderConfig::new_default(ProviderType::CustomOpenAI, 0);
        config.name = name.to_string();
        config.base_url = base_url.to_string();
        config
    }

    fn azure() -> ProviderConfig {
        let mut config = ProviderConfig::new_default(ProviderType::AzureOpenAI, 0);
        config.api_key = "key".to_string();
        config.base_url = "https://example.openai.azure.com".to_string();
        config.azure_deployment_names = vec!["gpt-4o".to_string()];
        config
    }

    #[test]
    fn test_custom_name_with_spaces_rejected() {
        let err = validate("custom_openai_1", &custom("My Provider", "http://x")).unwrap_err();
        assert_eq!(err, ValidationError::NameContainsSpaces);
    }

    #[test]
    fn test_custom_name_checked_before_base_url() {
        let err = validate("custom_openai_1", &custom("a b", "")).unwrap_err();
        assert_eq!(err, ValidationError::NameContainsSpaces);
    }

    #[test]
    fn test_custom_requires_base_url() {
        let err = validate("custom_openai_1", &custom("Local", "   ")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::BaseUrlRequired("custom_openai_1".to_string())
        );
        assert!(validate("custom_openai_1", &custom("Local", "http://localhost:1234")).is_ok());
    }

    #[test]
    fn test_endpoint_types_require_base_url() {
        for t in [ProviderType::Ollama, ProviderType::OpenRouter, ProviderType::Llama] {
            let mut config = ProviderConfig::new_default(t, 0);
            config.base_url.clear();
            let err = validate(t.as_str(), &config).unwrap_err();
            assert_eq!(err, ValidationError::BaseUrlRequired(t.display_name().to_string()));
        }
    }

    #[test]
    fn test_base_url_rule_follows_provider_type() {
        for &t in ProviderType::all() {
            let mut config = ProviderConfig::new_default(t, 0);
            config.name = "Local".to_string();
            config.api_key = "key".to_string();
            config.azure_deployment_names = vec!["gpt-4o".to_string()];
            config.base_url.clear();
            let result = validate(t.as_str(), &config);
            if t.requires_base_url() {
                assert!(matches!(result, Err(ValidationError::BaseUrlRequired(_))), "{t}");
            } else {
                assert!(result.is_ok(), "{t}");
            }
        }
    }

    #[test]
    fn test_azure_requires_all_fields() {
        assert!(validate("azure_openai", &azure()).is_ok());

        let mut missing_url = azure();
        missing_url.base_url.clear();
        assert!(matches!(
            validate("azure_openai", &missing_url),
            Err(ValidationError::BaseUrlRequired(_))
        ));

        let mut missing_key = azure();
        missing_key.api_key.clear();
        assert!(matches!(
            validate("azure_openai", &missing_key),
            Err(ValidationError::ApiKeyRequired(_))
        ));

        let mut missing_deployments = azure();
        missing_deployments.azure_deployment_names.clear();
        assert!(matches!(
            validate("azure_openai", &missing_deployments),
            Err(ValidationError::DeploymentRequired(_))
        ));

        let mut missing_version = azure();
        missing_version.azure_api_version = " ".to_string();
        assert!(matches!(
            validate("azure_openai", &missing_version),
            Err(ValidationError::ApiVersionRequired(_))
        ));
    }

    #[test]
    fn test_cloud_providers_have_no_structural_rules() {
        let config = ProviderConfig::new_default(ProviderType::Anthropic, 0);
        assert!(validate("anthropic", &config).is_ok());
    }

    #[test]
    fn test_has_enough_input() {
        let mut openai = ProviderConfig::new_default(ProviderType::OpenAI, 0);
        assert!(!has_enough_input(&openai));
        openai.api_key = "sk-x".to_string();
        assert!(has_enough_input(&openai));

        assert!(!has_enough_input(&custom("Local", "")));
        assert!(has_enough_input(&custom("Local", "http://x")));

        let mut incomplete = azure();
        assert!(has_enough_input(&incomplete));
        incomplete.azure_deployment_names.clear();
        assert!(!has_enough_input(&incomplete));
    }
}
