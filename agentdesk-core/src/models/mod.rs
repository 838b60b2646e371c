//! Model capability inference and default parameters.
//!
//! This module provides:
//! - `classify` - capability profile from a model identifier
//! - `resolve_defaults` - initial sampling parameters per provider and role

pub mod capability;
pub mod defaults;

pub use capability::{bare_model_name, classify, CapabilityProfile, ModelFamily};
pub use defaults::resolve_defaults;
