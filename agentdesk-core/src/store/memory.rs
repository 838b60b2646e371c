//! In-memory store used by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::agents::types::{AgentModelAssignment, AgentRole};
use crate::providers::config::ProviderConfig;

use super::{store_event_channel, SettingsStore, StoreError, StoreEvent, StoreEventReceiver, StoreEventSender};

#[derive(Default)]
pub(crate) struct MemoryStore {
    providers: RefCell<HashMap<String, ProviderConfig>>,
    agent_models: RefCell<HashMap<AgentRole, AgentModelAssignment>>,
    subscribers: RefCell<Vec<StoreEventSender>>,
    pub fail_reads: Cell<bool>,
    pub fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.get() {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.get() {
            return Err(StoreError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }

    fn notify(&self, event: StoreEvent) {
        self.subscribers
            .borrow_mut()
            .retain(|tx| tx.send(event).is_ok());
    }
}

impl SettingsStore for MemoryStore {
    fn get_all_providers(&self) -> Result<HashMap<String, ProviderConfig>, StoreError> {
        self.check_read()?;
        Ok(self.providers.borrow().clone())
    }

    fn set_provider(&self, provider_id: &str, config: &ProviderConfig) -> Result<(), StoreError> {
        self.check_write()?;
        self.providers
            .borrow_mut()
            .insert(provider_id.to_string(), config.clone());
        self.notify(StoreEvent::ProvidersChanged);
        Ok(())
    }

    fn remove_provider(&self, provider_id: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.providers.borrow_mut().remove(provider_id);
        self.notify(StoreEvent::ProvidersChanged);
        Ok(())
    }

    fn get_agent_model(&self, role: AgentRole) -> Result<Option<AgentModelAssignment>, StoreError> {
        self.check_read()?;
        Ok(self.agent_models.borrow().get(&role).cloned())
    }

    fn set_agent_model(
        &self,
        role: AgentRole,
        assignment: &AgentModelAssignment,
    ) -> Result<(), StoreError> {
        self.check_write()?;
        self.agent_models.borrow_mut().insert(role, assignment.clone());
        self.notify(StoreEvent::AgentModelsChanged);
        Ok(())
    }

    fn reset_agent_model(&self, role: AgentRole) -> Result<(), StoreError> {
        self.check_write()?;
        self.agent_models.borrow_mut().remove(&role);
        self.notify(StoreEvent::AgentModelsChanged);
        Ok(())
    }

    fn subscribe(&self) -> StoreEventReceiver {
        let (tx, rx) = store_event_channel();
        self.subscribers.borrow_mut().push(tx);
        rx
    }
}
