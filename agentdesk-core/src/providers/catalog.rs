//! Built-in model catalog.
//!
//! Used only when a provider has not customized its model list.

use super::types::ProviderType;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_LLAMA_BASE_URL: &str = "https://api.llama.com/v1";
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-15-preview";

/// Built-in model names for a provider type.
pub fn builtin_model_names(provider_type: ProviderType) -> &'static [&'static str] {
    match provider_type {
        ProviderType::OpenAI => &[
            "gpt-5",
            "gpt-5-mini",
            "gpt-5-chat-latest",
            "gpt-4.1",
            "gpt-4.1-mini",
            "gpt-4o",
            "gpt-4o-mini",
            "o4-mini",
            "o3",
        ],
        ProviderType::Anthropic => &[
            "claude-opus-4-1",
            "claude-sonnet-4-0",
            "claude-3-7-sonnet-latest",
            "claude-3-5-haiku-latest",
        ],
        ProviderType::DeepSeek => &["deepseek-chat", "deepseek-reasoner"],
        ProviderType::Gemini => &["gemini-2.5-flash", "gemini-2.5-pro"],
        ProviderType::Grok => &["grok-4", "grok-3", "grok-3-fast", "grok-3-mini", "grok-3-mini-fast"],
        ProviderType::OpenRouter => &[
            "openai/gpt-4.1",
            "openai/gpt-4.1-mini",
            "openai/o4-mini",
            "openai/gpt-4o-2024-11-20",
            "google/gemini-2.5-flash",
        ],
        ProviderType::Groq => &["llama-3.3-70b-versatile"],
        ProviderType::Cerebras => &["llama-3.3-70b"],
        ProviderType::Llama => &[
            "Llama-3.3-70B-Instruct",
            "Llama-3.3-8B-Instruct",
            "Llama-4-Maverick-17B-128E-Instruct-FP8",
            "Llama-4-Scout-17B-16E-Instruct-FP8",
        ],
        // Self-hosted and user-defined endpoints have no known models;
        // Azure lists deployments instead.
        ProviderType::Ollama | ProviderType::CustomOpenAI | ProviderType::AzureOpenAI => &[],
    }
}

/// Built-in model names for a provider id, owned.
///
/// Generated ids (`custom_openai_2`, ...) resolve to their type.
pub fn builtin_models_for_id(provider_id: &str) -> Vec<String> {
    ProviderType::from_provider_id(provider_id)
        .map(builtin_model_names)
        .unwrap_or_default()
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Default endpoint for a provider type, if it has one.
pub fn default_base_url(provider_type: ProviderType) -> Option<&'static str> {
    match provider_type {
        ProviderType::Ollama => Some(DEFAULT_OLLAMA_BASE_URL),
        ProviderType::OpenRouter => Some(DEFAULT_OPENROUTER_BASE_URL),
        ProviderType::Llama => Some(DEFAULT_LLAMA_BASE_URL),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cloud_providers_have_models() {
        for t in [
            ProviderType::OpenAI,
            ProviderType::Anthropic,
            ProviderType::Gemini,
            ProviderType::OpenRouter,
        ] {
            assert!(!builtin_model_names(t).is_empty(), "{t}");
        }
    }

    #[test]
    fn test_unmanaged_providers_have_no_models() {
        assert!(builtin_model_names(ProviderType::Ollama).is_empty());
        assert!(builtin_model_names(ProviderType::CustomOpenAI).is_empty());
        assert!(builtin_model_names(ProviderType::AzureOpenAI).is_empty());
    }

    #[test]
    fn test_builtin_models_for_generated_id() {
        assert!(builtin_models_for_id("custom_openai_4").is_empty());
        assert_eq!(builtin_models_for_id("gemini"), vec!["gemini-2.5-flash", "gemini-2.5-pro"]);
        assert!(builtin_models_for_id("unknown").is_empty());
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(default_base_url(ProviderType::Ollama), Some(DEFAULT_OLLAMA_BASE_URL));
        assert_eq!(default_base_url(ProviderType::OpenAI), None);
        assert_eq!(default_base_url(ProviderType::AzureOpenAI), None);
    }
}
