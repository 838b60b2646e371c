//! Per-role model assignments.

use tracing::{debug, info, warn};

use crate::error::SettingsError;
use crate::models::{classify, resolve_defaults, CapabilityProfile};
use crate::store::SettingsStore;

use super::types::{
    AgentModelAssignment, AgentRole, AvailableModel, ModelParameters, ModelSelection,
    ParameterKind, ReasoningEffort,
};

/// Local state for one role.
#[derive(Debug, Clone, Default, PartialEq)]
struct RoleState {
    selection: Option<ModelSelection>,
    parameters: ModelParameters,
    reasoning_effort: Option<ReasoningEffort>,
}

impl RoleState {
    fn from_assignment(role: AgentRole, assignment: AgentModelAssignment) -> Self {
        let defaults = resolve_defaults(&assignment.provider, role);
        Self {
            parameters: ModelParameters::new(
                assignment.parameters.temperature.unwrap_or(defaults.temperature),
                assignment.parameters.top_p.unwrap_or(defaults.top_p),
            ),
            reasoning_effort: assignment.reasoning_effort,
            selection: Some(assignment.selection()),
        }
    }

    fn capability(&self) -> Option<CapabilityProfile> {
        self.selection.as_ref().map(|s| classify(&s.composite()))
    }

    /// The record to persist, or `None` when no model is selected.
    fn to_assignment(&self) -> Option<AgentModelAssignment> {
        let selection = self.selection.as_ref()?;
        let profile = classify(&selection.composite());
        Some(AgentModelAssignment {
            provider: selection.provider.clone(),
            model_name: selection.model.clone(),
            parameters: self.parameters.to_stored(&profile),
            reasoning_effort: if profile.uses_discrete_reasoning_effort {
                self.reasoning_effort
            } else {
                None
            },
        })
    }
}

/// Model assignments for the planner and navigator roles.
///
/// Every mutation is written to the store before local state changes, so a
/// store failure leaves the manager exactly as it was.
#[derive(Debug, Default)]
pub struct AgentAssignments {
    planner: RoleState,
    navigator: RoleState,
    available: Vec<AvailableModel>,
}

impl AgentAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a manager populated from the store.
    pub fn load_from_store(store: &impl SettingsStore) -> Result<Self, SettingsError> {
        let mut assignments = Self::new();
        assignments.load(store)?;
        Ok(assignments)
    }

    /// Restore every role from the store and republish available models.
    ///
    /// Stored parameters that are absent fall back to the provider defaults.
    /// Values the store does not hold survive: a role without a stored
    /// assignment keeps its local parameters, and a stored model without a
    /// reasoning effort keeps the locally recorded one.
    pub fn load(&mut self, store: &impl SettingsStore) -> Result<(), SettingsError> {
        let mut planner = RoleState::default();
        let mut navigator = RoleState::default();
        for &role in AgentRole::all() {
            let local = self.role(role);
            let state = match store.get_agent_model(role)? {
                Some(assignment) => {
                    let mut state = RoleState::from_assignment(role, assignment);
                    state.reasoning_effort = state.reasoning_effort.or(local.reasoning_effort);
                    state
                }
                None => RoleState {
                    selection: None,
                    ..local.clone()
                },
            };
            match role {
                AgentRole::Planner => planner = state,
                AgentRole::Navigator => navigator = state,
            }
        }
        let available = collect_available_models(store)?;

        self.planner = planner;
        self.navigator = navigator;
        self.available = available;
        debug!(
            planner = ?self.planner.selection,
            navigator = ?self.navigator.selection,
            available_models = self.available.len(),
            "Agent assignments loaded from store"
        );
        Ok(())
    }

    /// Re-read providers and republish the available model list.
    pub fn refresh_available_models(&mut self, store: &impl SettingsStore) -> Result<(), SettingsError> {
        self.available = collect_available_models(store)?;
        Ok(())
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Assign a model to `role`, or clear the assignment with `None`.
    ///
    /// Parameters reset to the provider defaults for the role. Reasoning
    /// models keep the role's previous effort or get the role default;
    /// other models clear it.
    pub fn select_model(
        &mut self,
        role: AgentRole,
        selection: Option<ModelSelection>,
        store: &impl SettingsStore,
    ) -> Result<(), SettingsError> {
        let Some(selection) = selection else {
            store.reset_agent_model(role)?;
            self.role_mut(role).selection = None;
            info!(role = %role, "Cleared agent model");
            self.after_write(store);
            return Ok(());
        };

        let composite = selection.composite();
        let profile = classify(&composite);
        let previous = self.role(role);
        let next = RoleState {
            parameters: resolve_defaults(&selection.provider, role),
            reasoning_effort: if profile.uses_discrete_reasoning_effort {
                Some(
                    previous
                        .reasoning_effort
                        .unwrap_or_else(|| role.default_reasoning_effort()),
                )
            } else {
                None
            },
            selection: Some(selection),
        };

        if let Some(assignment) = next.to_assignment() {
            store.set_agent_model(role, &assignment)?;
        }
        info!(
            role = %role,
            model = %composite,
            family = ?profile.family,
            "Assigned agent model"
        );
        *self.role_mut(role) = next;
        self.after_write(store);
        Ok(())
    }

    /// Record a reasoning effort for `role`.
    ///
    /// It is only persisted while the selected model takes one; otherwise it
    /// is kept locally for the next reasoning model.
    pub fn set_reasoning_effort(
        &mut self,
        role: AgentRole,
        effort: ReasoningEffort,
        store: &impl SettingsStore,
    ) -> Result<(), SettingsError> {
        let mut next = self.role(role).clone();
        next.reasoning_effort = Some(effort);

        let persist = next
            .capability()
            .is_some_and(|p| p.uses_discrete_reasoning_effort);
        if persist {
            if let Some(assignment) = next.to_assignment() {
                store.set_agent_model(role, &assignment)?;
            }
        }

        debug!(role = %role, effort = %effort, persisted = persist, "Set reasoning effort");
        *self.role_mut(role) = next;
        if persist {
            self.after_write(store);
        }
        Ok(())
    }

    /// Set one sampling parameter, clamped to its range.
    ///
    /// Persisted while a model is selected; Anthropic models store
    /// temperature only. NaN and infinite values are rejected.
    pub fn set_parameter(
        &mut self,
        role: AgentRole,
        kind: ParameterKind,
        value: f64,
        store: &impl SettingsStore,
    ) -> Result<(), SettingsError> {
        if !value.is_finite() {
            return Err(SettingsError::InvalidParameter { kind, value });
        }
        let mut next = self.role(role).clone();
        next.parameters = next.parameters.with(kind, value);

        let assignment = next.to_assignment();
        if let Some(assignment) = &assignment {
            store.set_agent_model(role, assignment)?;
        }

        debug!(role = %role, parameter = ?kind, value, "Set model parameter");
        *self.role_mut(role) = next;
        if assignment.is_some() {
            self.after_write(store);
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn selected(&self, role: AgentRole) -> Option<&ModelSelection> {
        self.role(role).selection.as_ref()
    }

    pub fn parameters(&self, role: AgentRole) -> ModelParameters {
        self.role(role).parameters
    }

    /// The locally recorded reasoning effort, if any.
    pub fn reasoning_effort(&self, role: AgentRole) -> Option<ReasoningEffort> {
        self.role(role).reasoning_effort
    }

    /// The effort a picker should show: the recorded one or the role default.
    pub fn effective_reasoning_effort(&self, role: AgentRole) -> ReasoningEffort {
        self.reasoning_effort(role)
            .unwrap_or_else(|| role.default_reasoning_effort())
    }

    /// Capability profile of the selected model.
    pub fn selected_capability(&self, role: AgentRole) -> Option<CapabilityProfile> {
        self.role(role).capability()
    }

    /// The persisted form of the current assignment for `role`.
    pub fn assignment(&self, role: AgentRole) -> Option<AgentModelAssignment> {
        self.role(role).to_assignment()
    }

    /// Models that can be assigned, in provider creation order.
    pub fn available_models(&self) -> &[AvailableModel] {
        &self.available
    }

    fn role(&self, role: AgentRole) -> &RoleState {
        match role {
            AgentRole::Planner => &self.planner,
            AgentRole::Navigator => &self.navigator,
        }
    }

    fn role_mut(&mut self, role: AgentRole) -> &mut RoleState {
        match role {
            AgentRole::Planner => &mut self.planner,
            AgentRole::Navigator => &mut self.navigator,
        }
    }

    fn after_write(&mut self, store: &impl SettingsStore) {
        if let Err(e) = self.refresh_available_models(store) {
            warn!(error = %e, "Failed to refresh available models");
        }
    }
}

/// Flatten persisted providers into assignable models.
///
/// Azure providers contribute their deployments; others their own model
/// list or the built-in catalog.
fn collect_available_models(store: &impl SettingsStore) -> Result<Vec<AvailableModel>, SettingsError> {
    let providers = store.get_all_providers()?;

    let mut entries: Vec<_> = providers.into_iter().collect();
    entries.sort_by(|(id_a, a), (id_b, b)| {
        a.created_at
            .unwrap_or(0)
            .cmp(&b.created_at.unwrap_or(0))
            .then_with(|| id_a.cmp(id_b))
    });

    let models = entries
        .into_iter()
        .flat_map(|(provider, config)| {
            let provider_name = if config.name.is_empty() {
                provider.clone()
            } else {
                config.name.clone()
            };
            config
                .effective_model_names(&provider)
                .into_iter()
                .map(move |model| AvailableModel {
                    provider: provider.clone(),
                    provider_name: provider_name.clone(),
                    model,
                })
        })
        .collect();
    Ok(models)
}
