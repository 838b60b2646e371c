//! Model settings session.
//!
//! [`ModelSettings`] owns the store together with the provider registry and
//! the agent assignments, and keeps both in step with store change
//! notifications.

use std::path::PathBuf;

use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, warn};

use crate::agents::{AgentAssignments, AgentRole, ModelSelection, ParameterKind, ReasoningEffort};
use crate::db::Database;
use crate::error::SettingsError;
use crate::providers::{ProviderPatch, ProviderRegistry, ProviderType};
use crate::store::{SettingsStore, StoreEvent, StoreEventReceiver};

/// What a call to [`ModelSettings::sync`] reloaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncOutcome {
    pub providers: bool,
    pub agent_models: bool,
}

impl SyncOutcome {
    pub fn changed(&self) -> bool {
        self.providers || self.agent_models
    }
}

/// Provider and agent model settings backed by a store.
pub struct ModelSettings<S: SettingsStore> {
    store: S,
    providers: ProviderRegistry,
    agents: AgentAssignments,
    events: StoreEventReceiver,
}

impl ModelSettings<Database> {
    /// Open the SQLite store at `path` (or the default location), migrate it
    /// and load the settings.
    pub fn open(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let db = match path {
            Some(path) => Database::open_at(path)?,
            None => Database::open()?,
        };
        db.migrate()?;
        Ok(Self::load(db)?)
    }
}

impl<S: SettingsStore> ModelSettings<S> {
    /// Subscribe to `store` and load providers and assignments from it.
    pub fn load(store: S) -> Result<Self, SettingsError> {
        let events = store.subscribe();
        let providers = ProviderRegistry::load_from_store(&store)?;
        let agents = AgentAssignments::load_from_store(&store)?;
        debug!(
            providers = providers.len(),
            available_models = agents.available_models().len(),
            "Model settings loaded"
        );
        Ok(Self {
            store,
            providers,
            agents,
            events,
        })
    }

    /// Drain pending change notifications and reload what changed.
    ///
    /// A provider change reloads the registry (modified entries are kept)
    /// and the available model list; an assignment change reloads the
    /// assignments.
    pub fn sync(&mut self) -> Result<SyncOutcome, SettingsError> {
        let mut outcome = SyncOutcome::default();
        loop {
            match self.events.try_recv() {
                Ok(StoreEvent::ProvidersChanged) => outcome.providers = true,
                Ok(StoreEvent::AgentModelsChanged) => outcome.agent_models = true,
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if outcome.providers {
            self.providers.load(&self.store)?;
        }
        if outcome.agent_models {
            self.agents.load(&self.store)?;
        } else if outcome.providers {
            self.agents.refresh_available_models(&self.store)?;
        }
        if outcome.changed() {
            debug!(?outcome, "Model settings re-synced");
        }
        Ok(outcome)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    /// Mutable access for local edits that do not touch the store.
    pub fn providers_mut(&mut self) -> &mut ProviderRegistry {
        &mut self.providers
    }

    pub fn agents(&self) -> &AgentAssignments {
        &self.agents
    }

    // =========================================================================
    // Providers
    // =========================================================================

    pub fn start_draft(&mut self, provider_type: ProviderType) -> Result<String, SettingsError> {
        self.providers.start_draft(provider_type)
    }

    pub fn edit_provider(&mut self, provider_id: &str, patch: ProviderPatch) -> Result<(), SettingsError> {
        self.providers.edit(provider_id, patch)
    }

    pub fn cancel_provider(&mut self, provider_id: &str) -> bool {
        self.providers.cancel(provider_id)
    }

    pub fn save_provider(&mut self, provider_id: &str) -> Result<(), SettingsError> {
        self.providers.save(provider_id, &self.store)?;
        self.settle();
        Ok(())
    }

    pub fn delete_provider(&mut self, provider_id: &str) -> Result<(), SettingsError> {
        self.providers.delete(provider_id, &self.store)?;
        self.settle();
        Ok(())
    }

    // =========================================================================
    // Agents
    // =========================================================================

    pub fn select_model(
        &mut self,
        role: AgentRole,
        selection: Option<ModelSelection>,
    ) -> Result<(), SettingsError> {
        self.agents.select_model(role, selection, &self.store)?;
        self.settle();
        Ok(())
    }

    pub fn set_reasoning_effort(
        &mut self,
        role: AgentRole,
        effort: ReasoningEffort,
    ) -> Result<(), SettingsError> {
        self.agents.set_reasoning_effort(role, effort, &self.store)?;
        self.settle();
        Ok(())
    }

    pub fn set_parameter(
        &mut self,
        role: AgentRole,
        kind: ParameterKind,
        value: f64,
    ) -> Result<(), SettingsError> {
        self.agents.set_parameter(role, kind, value, &self.store)?;
        self.settle();
        Ok(())
    }

    /// Apply our own write notifications. The write itself already succeeded.
    fn settle(&mut self) {
        if let Err(e) = self.sync() {
            warn!(error = %e, "Failed to re-sync model settings after write");
        }
    }
}
