//! Provider configuration and registry.
//!
//! This module provides:
//! - `ProviderType` - Supported provider types
//! - `ProviderConfig` - Per-provider configuration
//! - `ProviderRegistry` - Working copy with draft and dirty tracking
//! - `validate` - Structural checks run before saving

pub mod catalog;
pub mod config;
pub mod registry;
pub mod types;
pub mod validate;

pub use catalog::{builtin_model_names, builtin_models_for_id};
pub use config::{ProviderConfig, ProviderPatch};
pub use registry::{FocusField, PrimaryAction, ProviderRegistry, ProviderState};
pub use types::{default_display_name, ProviderType, ValidationError};
pub use validate::{has_enough_input, validate};
