//! Agent roles and their model assignments.
//!
//! This module provides:
//! - `AgentRole` - The planner and navigator roles
//! - `ModelParameters` / `ReasoningEffort` - Per-role tuning
//! - `AgentAssignments` - Persisted per-role model selection

pub mod manager;
pub mod types;

pub use manager::AgentAssignments;
pub use types::{
    AgentModelAssignment, AgentRole, AvailableModel, ModelParameters, ModelSelection,
    ParameterKind, ReasoningEffort, StoredParameters,
};
