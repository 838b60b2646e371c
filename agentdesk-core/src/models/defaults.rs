//! Default sampling parameters per provider and agent role.

use crate::agents::types::{AgentRole, ModelParameters};
use crate::providers::types::ProviderType;

/// Fallback for providers without a tuned baseline.
const FALLBACK: (ModelParameters, ModelParameters) = (
    // (planner, navigator)
    ModelParameters {
        temperature: 0.1,
        top_p: 0.1,
    },
    ModelParameters {
        temperature: 0.1,
        top_p: 0.1,
    },
);

fn baseline(provider_type: ProviderType) -> (ModelParameters, ModelParameters) {
    match provider_type {
        ProviderType::OpenAI
        | ProviderType::Gemini
        | ProviderType::Grok
        | ProviderType::OpenRouter
        | ProviderType::AzureOpenAI => (
            ModelParameters::new(0.7, 0.9),
            ModelParameters::new(0.3, 0.85),
        ),
        ProviderType::Anthropic => (
            ModelParameters::new(0.3, 0.6),
            ModelParameters::new(0.2, 0.5),
        ),
        ProviderType::DeepSeek => (
            ModelParameters::new(0.6, 0.9),
            ModelParameters::new(0.3, 0.85),
        ),
        ProviderType::Ollama | ProviderType::Groq | ProviderType::Cerebras | ProviderType::Llama => (
            ModelParameters::new(0.3, 0.9),
            ModelParameters::new(0.1, 0.85),
        ),
        ProviderType::CustomOpenAI => FALLBACK,
    }
}

/// Initial parameters for a freshly selected model.
pub fn resolve_defaults(provider_id: &str, role: AgentRole) -> ModelParameters {
    let (planner, navigator) = ProviderType::from_provider_id(provider_id)
        .map(baseline)
        .unwrap_or(FALLBACK);

    match role {
        AgentRole::Planner => planner,
        AgentRole::Navigator => navigator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_defaults() {
        assert_eq!(
            resolve_defaults("openai", AgentRole::Planner),
            ModelParameters::new(0.7, 0.9)
        );
        assert_eq!(
            resolve_defaults("openai", AgentRole::Navigator),
            ModelParameters::new(0.3, 0.85)
        );
    }

    #[test]
    fn test_anthropic_is_more_conservative() {
        let anthropic = resolve_defaults("anthropic", AgentRole::Planner);
        let openai = resolve_defaults("openai", AgentRole::Planner);
        assert!(anthropic.temperature < openai.temperature);
    }

    #[test]
    fn test_generated_ids_resolve_by_type() {
        assert_eq!(
            resolve_defaults("azure_openai_2", AgentRole::Planner),
            resolve_defaults("azure_openai", AgentRole::Planner)
        );
        assert_eq!(
            resolve_defaults("custom_openai_3", AgentRole::Navigator),
            FALLBACK.1
        );
    }

    #[test]
    fn test_unknown_provider_uses_fallback() {
        assert_eq!(resolve_defaults("mystery", AgentRole::Planner), FALLBACK.0);
    }

    #[test]
    fn test_defaults_are_within_range() {
        for t in ProviderType::all() {
            for role in AgentRole::all() {
                let params = resolve_defaults(t.as_str(), *role);
                assert!((0.0..=2.0).contains(&params.temperature));
                assert!((0.0..=1.0).contains(&params.top_p));
            }
        }
    }
}
