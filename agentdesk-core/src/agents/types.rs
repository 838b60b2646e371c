//! Agent role and assignment types.

use serde::{Deserialize, Serialize};

use crate::models::capability::{CapabilityProfile, ModelFamily, MODEL_SEPARATOR};

pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;
pub const TOP_P_RANGE: std::ops::RangeInclusive<f64> = 0.0..=1.0;

/// Fixed agent roles a model can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Navigator,
    Planner,
}

impl AgentRole {
    pub fn all() -> &'static [AgentRole] {
        &[Self::Planner, Self::Navigator]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigator => "navigator",
            Self::Planner => "planner",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "navigator" => Some(Self::Navigator),
            "planner" => Some(Self::Planner),
            _ => None,
        }
    }

    /// Reasoning effort used when a reasoning model is first assigned.
    pub fn default_reasoning_effort(&self) -> ReasoningEffort {
        match self {
            Self::Planner => ReasoningEffort::Low,
            Self::Navigator => ReasoningEffort::Minimal,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete reasoning effort for reasoning models, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningEffort {
    Minimal,
    Low,
    Medium,
    High,
}

impl ReasoningEffort {
    pub fn all() -> &'static [ReasoningEffort] {
        &[Self::Minimal, Self::Low, Self::Medium, Self::High]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.as_str() == s)
    }
}

impl std::fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sampling parameter that can be tuned per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Temperature,
    TopP,
}

/// Working sampling parameters for a role.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ModelParameters {
    pub temperature: f64,
    pub top_p: f64,
}

impl ModelParameters {
    pub fn new(temperature: f64, top_p: f64) -> Self {
        Self { temperature, top_p }
    }

    /// Set one parameter, clamped to its valid range.
    pub fn with(mut self, kind: ParameterKind, value: f64) -> Self {
        match kind {
            ParameterKind::Temperature => {
                self.temperature = value.clamp(*TEMPERATURE_RANGE.start(), *TEMPERATURE_RANGE.end());
            }
            ParameterKind::TopP => {
                self.top_p = value.clamp(*TOP_P_RANGE.start(), *TOP_P_RANGE.end());
            }
        }
        self
    }

    /// The persisted form for a model of the given profile.
    ///
    /// Anthropic models only take temperature, so top-p is omitted for them.
    pub fn to_stored(self, profile: &CapabilityProfile) -> StoredParameters {
        match profile.family {
            ModelFamily::Anthropic => StoredParameters {
                temperature: Some(self.temperature),
                top_p: None,
            },
            ModelFamily::Reasoning | ModelFamily::Standard => StoredParameters {
                temperature: Some(self.temperature),
                top_p: Some(self.top_p),
            },
        }
    }
}

/// Sampling parameters as persisted. Absent fields were not sent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
}

/// A `(provider, model)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSelection {
    pub provider: String,
    pub model: String,
}

impl ModelSelection {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Parse a composite `provider>model` value.
    ///
    /// Returns `None` when either half is missing, which callers treat as
    /// "no model selected".
    pub fn parse(value: &str) -> Option<Self> {
        let (provider, model) = value.split_once(MODEL_SEPARATOR)?;
        if provider.is_empty() || model.is_empty() {
            return None;
        }
        Some(Self::new(provider, model))
    }

    /// Composite `provider>model` value.
    pub fn composite(&self) -> String {
        format!("{}{}{}", self.provider, MODEL_SEPARATOR, self.model)
    }
}

impl std::fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.composite())
    }
}

/// A role's persisted model assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentModelAssignment {
    pub provider: String,
    pub model_name: String,
    #[serde(default)]
    pub parameters: StoredParameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl AgentModelAssignment {
    pub fn selection(&self) -> ModelSelection {
        ModelSelection::new(&self.provider, &self.model_name)
    }
}

/// One entry in the list of models that can be assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableModel {
    pub provider: String,
    pub provider_name: String,
    pub model: String,
}

impl AvailableModel {
    pub fn selection(&self) -> ModelSelection {
        ModelSelection::new(&self.provider, &self.model)
    }

    /// Label shown in model pickers.
    pub fn label(&self) -> String {
        format!("{} > {}", self.provider_name, self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capability::classify;

    #[test]
    fn test_role_default_reasoning_effort() {
        assert_eq!(AgentRole::Planner.default_reasoning_effort(), ReasoningEffort::Low);
        assert_eq!(
            AgentRole::Navigator.default_reasoning_effort(),
            ReasoningEffort::Minimal
        );
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(AgentRole::parse("Planner"), Some(AgentRole::Planner));
        assert_eq!(AgentRole::parse("navigator"), Some(AgentRole::Navigator));
        assert_eq!(AgentRole::parse("validator"), None);
    }

    #[test]
    fn test_reasoning_effort_is_ordered() {
        assert!(ReasoningEffort::Minimal < ReasoningEffort::Low);
        assert!(ReasoningEffort::Medium < ReasoningEffort::High);
        assert_eq!(ReasoningEffort::parse("medium"), Some(ReasoningEffort::Medium));
    }

    #[test]
    fn test_parameters_are_clamped() {
        let params = ModelParameters::new(0.5, 0.5)
            .with(ParameterKind::Temperature, 3.0)
            .with(ParameterKind::TopP, -1.0);
        assert_eq!(params, ModelParameters::new(2.0, 0.0));
    }

    #[test]
    fn test_to_stored_omits_top_p_for_anthropic() {
        let params = ModelParameters::new(0.9, 0.4);
        let stored = params.to_stored(&classify("claude-3-opus"));
        assert_eq!(stored.temperature, Some(0.9));
        assert_eq!(stored.top_p, None);

        let stored = params.to_stored(&classify("gpt-4o"));
        assert_eq!(stored.top_p, Some(0.4));
    }

    #[test]
    fn test_stored_parameters_skip_absent_fields() {
        let stored = StoredParameters {
            temperature: Some(0.9),
            top_p: None,
        };
        let json = serde_json::to_string(&stored).unwrap();
        assert_eq!(json, r#"{"temperature":0.9}"#);
    }

    #[test]
    fn test_selection_parse() {
        let selection = ModelSelection::parse("anthropic>claude-3-opus").unwrap();
        assert_eq!(selection.provider, "anthropic");
        assert_eq!(selection.model, "claude-3-opus");
        assert_eq!(selection.composite(), "anthropic>claude-3-opus");

        assert!(ModelSelection::parse("").is_none());
        assert!(ModelSelection::parse("openai>").is_none());
        assert!(ModelSelection::parse("gpt-4o").is_none());
    }

    #[test]
    fn test_available_model_label() {
        let model = AvailableModel {
            provider: "openai".to_string(),
            provider_name: "OpenAI".to_string(),
            model: "gpt-4o".to_string(),
        };
        assert_eq!(model.label(), "OpenAI > gpt-4o");
        assert_eq!(model.selection().composite(), "openai>gpt-4o");
    }
}
