//! Agentdesk Core Library
//!
//! This crate provides the model configuration engine for Agentdesk, a
//! browser-automation agent. It includes:
//!
//! - Provider registry with draft and unsaved-change tracking
//! - Per-type provider validation
//! - Model capability classification and default sampling parameters
//! - Planner and navigator model assignments
//! - SQLite storage with change notifications

pub mod agents;
pub mod db;
pub mod error;
pub mod models;
pub mod providers;
pub mod session;
pub mod store;

// Re-exports for convenience
pub use db::Database;
pub use error::SettingsError;
pub use session::{ModelSettings, SyncOutcome};

// Re-export store gateway
pub use store::{SettingsStore, StoreError, StoreEvent, StoreEventReceiver};

// Re-export providers
pub use providers::{
    FocusField, PrimaryAction, ProviderConfig, ProviderPatch, ProviderRegistry, ProviderState,
    ProviderType, ValidationError,
};

// Re-export agents
pub use agents::{
    AgentAssignments, AgentModelAssignment, AgentRole, AvailableModel, ModelParameters,
    ModelSelection, ParameterKind, ReasoningEffort,
};

// Re-export model capabilities
pub use models::{classify, resolve_defaults, CapabilityProfile, ModelFamily};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
