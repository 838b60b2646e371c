//! Working copy of provider configurations.
//!
//! The registry holds every provider the user can see: the ones loaded from
//! the store plus local drafts and edits. Two id sets describe each entry:
//!
//! | in `from_storage` | in `modified` | state              |
//! |-------------------|---------------|--------------------|
//! | yes               | no            | persisted          |
//! | yes               | yes           | persisted+modified |
//! | no                | yes           | draft              |

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::SettingsError;
use crate::store::SettingsStore;

use super::config::{ProviderConfig, ProviderPatch};
use super::types::{ProviderType, ValidationError};
use super::validate::{has_enough_input, validate};

const CUSTOM_ID_PREFIX: &str = "custom_openai_";

/// Lifecycle state of a provider, derived from the two id sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderState {
    Persisted,
    Modified,
    Draft,
}

/// The single action offered for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryAction {
    /// Persisted and unmodified: can be deleted.
    Delete,
    /// Anything else: must be saved (or cancelled, for drafts).
    Save { enabled: bool },
}

/// Field to focus after a draft is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusField {
    Name,
    ApiKey,
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Registry of provider configurations with uncommitted-change tracking.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, ProviderConfig>,
    from_storage: HashSet<String>,
    modified: HashSet<String>,
    errors: HashMap<String, ValidationError>,
}

impl ProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry populated from the store.
    pub fn load_from_store(store: &impl SettingsStore) -> Result<Self, SettingsError> {
        let mut registry = Self::new();
        registry.load(store)?;
        Ok(registry)
    }

    /// Refresh from the store.
    ///
    /// Persisted membership is reset to exactly what the store returns.
    /// Entries with uncommitted changes keep their working copy; all other
    /// entries are replaced or dropped. On error nothing changes.
    pub fn load(&mut self, store: &impl SettingsStore) -> Result<(), SettingsError> {
        let stored = store.get_all_providers()?;

        let mut merged: HashMap<String, ProviderConfig> = stored
            .iter()
            .filter(|(id, _)| !self.modified.contains(*id))
            .map(|(id, config)| (id.clone(), config.clone()))
            .collect();
        for id in &self.modified {
            if let Some(config) = self.providers.remove(id) {
                merged.insert(id.clone(), config);
            }
        }

        self.from_storage = stored.into_keys().collect();
        self.providers = merged;
        self.errors.retain(|id, _| self.providers.contains_key(id));

        debug!(
            total_providers = self.providers.len(),
            persisted = self.from_storage.len(),
            modified = self.modified.len(),
            "ProviderRegistry loaded from store"
        );
        Ok(())
    }

    // =========================================================================
    // Local edits
    // =========================================================================

    /// Create a draft provider of `provider_type` and return its id.
    ///
    /// Custom gateways get `custom_openai_{n}` one past the highest suffix in
    /// use; Azure gets `azure_openai`, then `azure_openai_{n}`. Every other
    /// type uses its own id and can only exist once.
    pub fn start_draft(&mut self, provider_type: ProviderType) -> Result<String, SettingsError> {
        let mut config = ProviderConfig::new_default(provider_type, now_millis());

        let id = match provider_type {
            ProviderType::CustomOpenAI => {
                let next = self
                    .providers
                    .keys()
                    .filter_map(|id| id.strip_prefix(CUSTOM_ID_PREFIX))
                    .filter_map(|suffix| suffix.parse::<u32>().ok())
                    .max()
                    .unwrap_or(0)
                    + 1;
                config.name = format!("CustomProvider{next}");
                format!("{CUSTOM_ID_PREFIX}{next}")
            }
            ProviderType::AzureOpenAI => {
                let prefix = ProviderType::AzureOpenAI.as_str();
                let mut count = self
                    .providers
                    .keys()
                    .filter(|id| id.starts_with(prefix))
                    .count()
                    + 1;
                let id = loop {
                    let candidate = if count == 1 {
                        prefix.to_string()
                    } else {
                        format!("{prefix}_{count}")
                    };
                    if !self.providers.contains_key(&candidate) {
                        break candidate;
                    }
                    count += 1;
                };
                config.name = format!("Azure OpenAI {count}");
                id
            }
            _ => {
                let id = provider_type.as_str().to_string();
                if self.providers.contains_key(&id) {
                    return Err(SettingsError::ProviderExists(provider_type));
                }
                id
            }
        };

        info!(provider = %id, provider_type = %provider_type, "Created provider draft");
        self.providers.insert(id.clone(), config);
        self.modified.insert(id.clone());
        Ok(id)
    }

    /// Merge `patch` into the working copy and mark it modified.
    pub fn edit(&mut self, provider_id: &str, patch: ProviderPatch) -> Result<(), SettingsError> {
        let config = self.get_mut_or_err(provider_id)?;
        patch.apply(config);
        self.mark_modified(provider_id);
        Ok(())
    }

    /// Add a model name. Blank and duplicate names are ignored.
    pub fn add_model(&mut self, provider_id: &str, model: &str) -> Result<(), SettingsError> {
        let config = self.get_mut_or_err(provider_id)?;
        if config.add_model(provider_id, model) {
            self.mark_modified(provider_id);
        }
        Ok(())
    }

    /// Remove a model name.
    pub fn remove_model(&mut self, provider_id: &str, model: &str) -> Result<(), SettingsError> {
        self.get_mut_or_err(provider_id)?.remove_model(provider_id, model);
        self.mark_modified(provider_id);
        Ok(())
    }

    /// Add an Azure deployment name. Blank and duplicate names are ignored.
    pub fn add_azure_deployment(&mut self, provider_id: &str, name: &str) -> Result<(), SettingsError> {
        let name = name.trim();
        let config = self.get_mut_or_err(provider_id)?;
        if name.is_empty() || config.azure_deployment_names.iter().any(|d| d == name) {
            return Ok(());
        }
        config.azure_deployment_names.push(name.to_string());
        self.mark_modified(provider_id);
        Ok(())
    }

    /// Remove an Azure deployment name.
    pub fn remove_azure_deployment(
        &mut self,
        provider_id: &str,
        name: &str,
    ) -> Result<(), SettingsError> {
        self.get_mut_or_err(provider_id)?
            .azure_deployment_names
            .retain(|d| d != name);
        self.mark_modified(provider_id);
        Ok(())
    }

    pub fn set_azure_api_version(
        &mut self,
        provider_id: &str,
        version: &str,
    ) -> Result<(), SettingsError> {
        self.get_mut_or_err(provider_id)?.azure_api_version = version.trim().to_string();
        self.mark_modified(provider_id);
        Ok(())
    }

    /// Discard a draft.
    ///
    /// Only drafts can be cancelled; for anything else this is a no-op.
    /// Returns whether a draft was discarded.
    pub fn cancel(&mut self, provider_id: &str) -> bool {
        if self.state(provider_id) != Some(ProviderState::Draft) {
            return false;
        }
        self.providers.remove(provider_id);
        self.modified.remove(provider_id);
        self.errors.remove(provider_id);
        debug!(provider = %provider_id, "Discarded provider draft");
        true
    }

    // =========================================================================
    // Write-through
    // =========================================================================

    /// Validate and persist a provider.
    ///
    /// A validation failure is recorded for this provider and returned; a
    /// store failure is returned. Either way the tracking sets are unchanged.
    pub fn save(&mut self, provider_id: &str, store: &impl SettingsStore) -> Result<(), SettingsError> {
        let config = self
            .providers
            .get(provider_id)
            .ok_or_else(|| SettingsError::ProviderNotFound(provider_id.to_string()))?;

        if let Err(source) = validate(provider_id, config) {
            warn!(provider = %provider_id, error = %source, "Provider failed validation");
            self.errors.insert(provider_id.to_string(), source.clone());
            return Err(SettingsError::Validation {
                id: provider_id.to_string(),
                source,
            });
        }

        let record = config.normalized_for_save(provider_id, now_millis());
        store.set_provider(provider_id, &record)?;

        self.errors.remove(provider_id);
        self.from_storage.insert(provider_id.to_string());
        self.modified.remove(provider_id);
        self.providers.insert(provider_id.to_string(), record);
        info!(provider = %provider_id, "Saved provider");

        if let Err(e) = self.load(store) {
            warn!(provider = %provider_id, error = %e, "Failed to re-sync providers after save");
        }
        Ok(())
    }

    /// Delete a persisted, unmodified provider.
    pub fn delete(&mut self, provider_id: &str, store: &impl SettingsStore) -> Result<(), SettingsError> {
        match self.state(provider_id) {
            None => return Err(SettingsError::ProviderNotFound(provider_id.to_string())),
            Some(ProviderState::Draft) => {
                return Err(SettingsError::ProviderNotPersisted(provider_id.to_string()))
            }
            Some(ProviderState::Modified) => {
                return Err(SettingsError::ProviderModified(provider_id.to_string()))
            }
            Some(ProviderState::Persisted) => {}
        }

        store.remove_provider(provider_id)?;

        self.from_storage.remove(provider_id);
        self.providers.remove(provider_id);
        self.modified.remove(provider_id);
        self.errors.remove(provider_id);
        info!(provider = %provider_id, "Deleted provider");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get a provider's working copy.
    pub fn get(&self, provider_id: &str) -> Option<&ProviderConfig> {
        self.providers.get(provider_id)
    }

    /// Check if a provider exists in the working copy.
    pub fn contains(&self, provider_id: &str) -> bool {
        self.providers.contains_key(provider_id)
    }

    pub fn is_persisted(&self, provider_id: &str) -> bool {
        self.from_storage.contains(provider_id)
    }

    pub fn is_modified(&self, provider_id: &str) -> bool {
        self.modified.contains(provider_id)
    }

    /// Ids with uncommitted local changes.
    pub fn modified_ids(&self) -> &HashSet<String> {
        &self.modified
    }

    /// Derived lifecycle state. `None` for providers that are not tracked.
    pub fn state(&self, provider_id: &str) -> Option<ProviderState> {
        match (self.is_persisted(provider_id), self.is_modified(provider_id)) {
            (true, false) => Some(ProviderState::Persisted),
            (true, true) => Some(ProviderState::Modified),
            (false, true) => Some(ProviderState::Draft),
            (false, false) => None,
        }
    }

    /// Whether the save action is enabled for a provider.
    pub fn can_save(&self, provider_id: &str) -> bool {
        self.is_modified(provider_id)
            && self.providers.get(provider_id).is_some_and(has_enough_input)
    }

    /// The action to offer for a provider.
    pub fn primary_action(&self, provider_id: &str) -> PrimaryAction {
        if self.state(provider_id) == Some(ProviderState::Persisted) {
            PrimaryAction::Delete
        } else {
            PrimaryAction::Save {
                enabled: self.can_save(provider_id),
            }
        }
    }

    /// The last validation error recorded for a provider.
    pub fn validation_error(&self, provider_id: &str) -> Option<&ValidationError> {
        self.errors.get(provider_id)
    }

    /// Field a front end should focus for a freshly created draft.
    pub fn focus_field(&self, provider_id: &str) -> Option<FocusField> {
        self.providers.get(provider_id).map(|config| match config.provider_type {
            ProviderType::CustomOpenAI => FocusField::Name,
            _ => FocusField::ApiKey,
        })
    }

    /// Provider types that can be added right now.
    ///
    /// Azure and custom gateways can always be added again; every other
    /// type only while it is neither persisted nor drafted.
    pub fn addable_types(&self) -> Vec<ProviderType> {
        ProviderType::all()
            .iter()
            .copied()
            .filter(|t| t.is_repeatable() || self.state(t.as_str()).is_none())
            .collect()
    }

    /// Tracked providers in display order.
    ///
    /// Persisted providers come first, drafts last; within each group by
    /// creation time, then by name.
    pub fn sorted(&self) -> Vec<(&str, &ProviderConfig)> {
        let mut entries: Vec<(&str, &ProviderConfig)> = self
            .providers
            .iter()
            .filter(|(id, _)| self.state(id).is_some())
            .map(|(id, config)| (id.as_str(), config))
            .collect();

        entries.sort_by(|(id_a, a), (id_b, b)| {
            let draft_a = !self.is_persisted(id_a);
            let draft_b = !self.is_persisted(id_b);
            draft_a
                .cmp(&draft_b)
                .then_with(|| a.created_at.unwrap_or(0).cmp(&b.created_at.unwrap_or(0)))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| id_a.cmp(id_b))
        });
        entries
    }

    /// Number of providers in the working copy.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn get_mut_or_err(&mut self, provider_id: &str) -> Result<&mut ProviderConfig, SettingsError> {
        self.providers
            .get_mut(provider_id)
            .ok_or_else(|| SettingsError::ProviderNotFound(provider_id.to_string()))
    }

    fn mark_modified(&mut self, provider_id: &str) {
        if self.modified.insert(provider_id.to_string()) {
            debug!(provider = %provider_id, "Provider marked modified");
        }
    }
}
