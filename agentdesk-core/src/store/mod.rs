//! Persistence gateway for provider and agent model settings.
//!
//! The engine only talks to storage through [`SettingsStore`]. The SQLite
//! [`Database`](crate::db::Database) implements it; tests substitute their own.

mod sqlite;

#[cfg(test)]
pub(crate) mod memory;

use std::collections::HashMap;

use thiserror::Error;
use tokio::sync::mpsc;

use crate::agents::types::{AgentModelAssignment, AgentRole};
use crate::providers::config::ProviderConfig;

/// Errors raised by the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Change Notifications
// =============================================================================

/// Notification that the underlying store changed.
///
/// Carries no payload beyond what changed; consumers re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    ProvidersChanged,
    AgentModelsChanged,
}

/// Sender for store change events.
pub type StoreEventSender = mpsc::UnboundedSender<StoreEvent>;

/// Receiver for store change events.
pub type StoreEventReceiver = mpsc::UnboundedReceiver<StoreEvent>;

/// Create a store event channel.
pub fn store_event_channel() -> (StoreEventSender, StoreEventReceiver) {
    mpsc::unbounded_channel()
}

// =============================================================================
// Gateway
// =============================================================================

/// Durable key/value storage consumed by the settings engine.
pub trait SettingsStore {
    /// All persisted providers keyed by provider id.
    fn get_all_providers(&self) -> Result<HashMap<String, ProviderConfig>, StoreError>;

    /// Insert or replace one provider.
    fn set_provider(&self, provider_id: &str, config: &ProviderConfig) -> Result<(), StoreError>;

    /// Remove one provider. No-op if it does not exist.
    fn remove_provider(&self, provider_id: &str) -> Result<(), StoreError>;

    /// The assignment for a role, if any.
    fn get_agent_model(&self, role: AgentRole) -> Result<Option<AgentModelAssignment>, StoreError>;

    /// Insert or replace the assignment for a role.
    fn set_agent_model(
        &self,
        role: AgentRole,
        assignment: &AgentModelAssignment,
    ) -> Result<(), StoreError>;

    /// Clear the assignment for a role.
    fn reset_agent_model(&self, role: AgentRole) -> Result<(), StoreError>;

    /// Subscribe to change notifications. Delivery is at-least-once.
    fn subscribe(&self) -> StoreEventReceiver;
}
