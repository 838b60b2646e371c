//! Provider type definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structural problems found when validating a provider before save.
///
/// Each variant carries the provider's default display name so the message
/// can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Spaces are not allowed in the provider name")]
    NameContainsSpaces,
    #[error("Base URL is required for {0}")]
    BaseUrlRequired(String),
    #[error("API key is required for {0}")]
    ApiKeyRequired(String),
    #[error("At least one deployment name is required for {0}")]
    DeploymentRequired(String),
    #[error("API version is required for {0}")]
    ApiVersionRequired(String),
}

/// Supported provider types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderType {
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    #[serde(rename = "deepseek")]
    DeepSeek,
    Gemini,
    Grok,
    Ollama,
    #[serde(rename = "azure_openai")]
    AzureOpenAI,
    #[serde(rename = "openrouter")]
    OpenRouter,
    Groq,
    Cerebras,
    Llama,
    /// Any OpenAI-compatible gateway.
    #[serde(rename = "custom_openai")]
    CustomOpenAI,
}

impl ProviderType {
    /// Get all provider types, in picker order.
    pub fn all() -> &'static [ProviderType] {
        &[
            Self::OpenAI,
            Self::Anthropic,
            Self::DeepSeek,
            Self::Gemini,
            Self::Grok,
            Self::Ollama,
            Self::AzureOpenAI,
            Self::OpenRouter,
            Self::Groq,
            Self::Cerebras,
            Self::Llama,
            Self::CustomOpenAI,
        ]
    }

    /// Wire id of the type. Built-in providers use it as their provider id.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::DeepSeek => "deepseek",
            Self::Gemini => "gemini",
            Self::Grok => "grok",
            Self::Ollama => "ollama",
            Self::AzureOpenAI => "azure_openai",
            Self::OpenRouter => "openrouter",
            Self::Groq => "groq",
            Self::Cerebras => "cerebras",
            Self::Llama => "llama",
            Self::CustomOpenAI => "custom_openai",
        }
    }

    /// Parse a wire id. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    /// Infer the type from a provider id, including generated ids such as
    /// `custom_openai_2` or `azure_openai_3`.
    pub fn from_provider_id(provider_id: &str) -> Option<Self> {
        if let Some(t) = Self::parse(provider_id) {
            return Some(t);
        }
        [Self::CustomOpenAI, Self::AzureOpenAI]
            .into_iter()
            .find(|t| provider_id.starts_with(t.as_str()))
    }

    /// Types that can be added more than once, each under a generated id.
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Self::CustomOpenAI | Self::AzureOpenAI)
    }

    /// Types whose endpoint is user-configurable and must be set.
    pub fn requires_base_url(&self) -> bool {
        matches!(
            self,
            Self::CustomOpenAI | Self::Ollama | Self::AzureOpenAI | Self::OpenRouter | Self::Llama
        )
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::DeepSeek => "DeepSeek",
            Self::Gemini => "Gemini",
            Self::Grok => "Grok",
            Self::Ollama => "Ollama",
            Self::AzureOpenAI => "Azure OpenAI",
            Self::OpenRouter => "OpenRouter",
            Self::Groq => "Groq",
            Self::Cerebras => "Cerebras",
            Self::Llama => "Llama",
            Self::CustomOpenAI => "OpenAI-compatible API Provider",
        }
    }
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default display name for a provider id.
///
/// Built-in ids map to their type's name; generated ids are shown as-is.
pub fn default_display_name(provider_id: &str) -> String {
    match ProviderType::parse(provider_id) {
        Some(t) if t != ProviderType::CustomOpenAI => t.display_name().to_string(),
        _ => provider_id.to_string(),
    }
}
