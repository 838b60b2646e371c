//! Provider configuration struct.

use serde::{Deserialize, Serialize};

use super::catalog::{builtin_model_names, builtin_models_for_id, default_base_url, DEFAULT_AZURE_API_VERSION};
use super::types::{default_display_name, ProviderType};

/// Configuration for one provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider type
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// API key (may be empty for self-hosted types)
    #[serde(default)]
    pub api_key: String,
    /// Base URL, or the endpoint for Azure
    #[serde(default)]
    pub base_url: String,
    /// Model names added by the user. `None` falls back to the built-in list.
    #[serde(default)]
    pub model_names: Option<Vec<String>>,
    /// Azure deployment names
    #[serde(default)]
    pub azure_deployment_names: Vec<String>,
    /// Azure API version
    #[serde(default)]
    pub azure_api_version: String,
    /// Creation time in epoch milliseconds
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl ProviderConfig {
    /// Default-shaped config for a freshly added provider of `provider_type`.
    pub fn new_default(provider_type: ProviderType, created_at: i64) -> Self {
        let mut config = Self {
            provider_type,
            name: provider_type.display_name().to_string(),
            api_key: String::new(),
            base_url: default_base_url(provider_type).unwrap_or_default().to_string(),
            model_names: Some(
                builtin_model_names(provider_type)
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
            ),
            azure_deployment_names: Vec::new(),
            azure_api_version: String::new(),
            created_at: Some(created_at),
        };

        match provider_type {
            ProviderType::Ollama => {
                config.api_key = "ollama".to_string();
            }
            ProviderType::AzureOpenAI => {
                config.model_names = None;
                config.azure_api_version = DEFAULT_AZURE_API_VERSION.to_string();
            }
            _ => {}
        }

        config
    }

    /// Model names offered for selection.
    ///
    /// Azure providers expose their deployments; everything else its own
    /// list or the built-in catalog for `provider_id`.
    pub fn effective_model_names(&self, provider_id: &str) -> Vec<String> {
        if self.provider_type == ProviderType::AzureOpenAI {
            return self.azure_deployment_names.clone();
        }
        self.model_names
            .clone()
            .unwrap_or_else(|| builtin_models_for_id(provider_id))
    }

    /// Display name, falling back to the id-derived default.
    pub fn display_name(&self, provider_id: &str) -> String {
        if self.name.is_empty() {
            default_display_name(provider_id)
        } else {
            self.name.clone()
        }
    }

    /// The exact record written to the store on save.
    pub fn normalized_for_save(&self, provider_id: &str, now: i64) -> Self {
        let mut config = self.clone();
        config.name = self.display_name(provider_id);
        config.created_at = Some(self.created_at.unwrap_or(now));
        config.model_names = match self.provider_type {
            ProviderType::AzureOpenAI => None,
            _ => Some(self.effective_model_names(provider_id)),
        };
        config
    }

    /// Add a model name. Blank and duplicate names are ignored.
    ///
    /// Returns whether the list changed.
    pub fn add_model(&mut self, provider_id: &str, model: &str) -> bool {
        let model = model.trim();
        if model.is_empty() {
            return false;
        }
        let mut models = self.effective_model_names(provider_id);
        if models.iter().any(|m| m == model) {
            return false;
        }
        models.push(model.to_string());
        self.model_names = Some(models);
        true
    }

    /// Remove a model name. The list is materialized even when nothing is removed.
    pub fn remove_model(&mut self, provider_id: &str, model: &str) {
        let mut models = self.effective_model_names(provider_id);
        models.retain(|m| m != model);
        self.model_names = Some(models);
    }
}

/// Partial update for a provider's working copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderPatch {
    pub name: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_names: Option<Vec<String>>,
    pub azure_deployment_names: Option<Vec<String>>,
    pub azure_api_version: Option<String>,
}

impl ProviderPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `config`. Text fields are trimmed as they are entered.
    pub fn apply(self, config: &mut ProviderConfig) {
        if let Some(name) = self.name {
            config.name = name.trim().to_string();
        }
        if let Some(api_key) = self.api_key {
            config.api_key = api_key.trim().to_string();
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url.trim().to_string();
        }
        if let Some(models) = self.model_names {
            config.model_names = Some(models);
        }
        if let Some(deployments) = self.azure_deployment_names {
            config.azure_deployment_names = deployments;
        }
        if let Some(version) = self.azure_api_version {
            config.azure_api_version = version.trim().to_string();
        }
    }
}
