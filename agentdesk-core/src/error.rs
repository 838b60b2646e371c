//! Errors returned by settings operations.

use thiserror::Error;

use crate::agents::types::ParameterKind;
use crate::providers::types::{ProviderType, ValidationError};
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid provider {id}: {source}")]
    Validation {
        id: String,
        #[source]
        source: ValidationError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),
    #[error("Provider {0} is already configured")]
    ProviderExists(ProviderType),
    #[error("Provider {0} has unsaved changes; save or cancel them first")]
    ProviderModified(String),
    #[error("Provider {0} has not been saved")]
    ProviderNotPersisted(String),
    #[error("Invalid {kind:?} value: {value}")]
    InvalidParameter { kind: ParameterKind, value: f64 },
}

impl SettingsError {
    /// The validation failure, if this is one.
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}
