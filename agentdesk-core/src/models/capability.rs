//! Capability inference from model identifiers.
//!
//! Model ids are opaque strings, so the tunable parameters a model accepts
//! are inferred from its name. The rules are a fixed, ordered list and the
//! first match wins:
//!
//! 1. `claude-*` is the Anthropic family (temperature only).
//! 2. `o*` and `gpt-5*` (except `gpt-5-chat*`) are reasoning models
//!    (discrete reasoning effort, no sampling parameters).
//! 3. Everything else is a standard model (temperature and top-p).

use serde::{Deserialize, Serialize};

/// Separator between provider id and model name in a composite identifier.
pub const MODEL_SEPARATOR: char = '>';

/// Vendor namespace used by OpenAI-compatible gateways such as OpenRouter.
const OPENAI_VENDOR_PREFIX: &str = "openai/";

/// Model family a capability profile was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    /// Anthropic Claude models.
    Anthropic,
    /// OpenAI o-series and GPT-5 reasoning models.
    Reasoning,
    /// Anything else.
    Standard,
}

/// The parameters a model accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityProfile {
    pub family: ModelFamily,
    pub uses_discrete_reasoning_effort: bool,
    pub supports_temperature: bool,
    pub supports_nucleus_sampling: bool,
}

impl CapabilityProfile {
    /// Profile for a given family.
    pub const fn for_family(family: ModelFamily) -> Self {
        match family {
            ModelFamily::Anthropic => Self {
                family,
                uses_discrete_reasoning_effort: false,
                supports_temperature: true,
                supports_nucleus_sampling: false,
            },
            ModelFamily::Reasoning => Self {
                family,
                uses_discrete_reasoning_effort: true,
                supports_temperature: false,
                supports_nucleus_sampling: false,
            },
            ModelFamily::Standard => Self {
                family,
                uses_discrete_reasoning_effort: false,
                supports_temperature: true,
                supports_nucleus_sampling: true,
            },
        }
    }

    pub fn is_anthropic(&self) -> bool {
        self.family == ModelFamily::Anthropic
    }

    pub fn is_reasoning(&self) -> bool {
        self.uses_discrete_reasoning_effort
    }
}

/// Strip the `provider>` prefix and the `openai/` vendor namespace.
pub fn bare_model_name(model_identifier: &str) -> &str {
    let name = match model_identifier.split_once(MODEL_SEPARATOR) {
        Some((_, model)) => model,
        None => model_identifier,
    };
    name.strip_prefix(OPENAI_VENDOR_PREFIX).unwrap_or(name)
}

/// Classify a model identifier.
///
/// Accepts either a bare model name or a composite `provider>model` value.
/// Unknown identifiers fall through to [`ModelFamily::Standard`].
pub fn classify(model_identifier: &str) -> CapabilityProfile {
    let name = bare_model_name(model_identifier);

    let family = if name.starts_with("claude-") {
        ModelFamily::Anthropic
    } else if name.starts_with('o') || (name.starts_with("gpt-5") && !name.starts_with("gpt-5-chat"))
    {
        ModelFamily::Reasoning
    } else {
        ModelFamily::Standard
    };

    CapabilityProfile::for_family(family)
}
