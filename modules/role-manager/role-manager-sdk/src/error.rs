//! Error types for the role manager contract.

use thiserror::Error;

/// Errors surfaced to the policy enforcer by a [`crate::RoleManager`].
#[derive(Debug, Error)]
pub enum RoleManagerError {
    /// The name has no identifier in the backend's directory.
    #[error("ID not found for name '{name}'")]
    NameNotFound { name: String },

    /// A domain qualifier was supplied to a backend without domain support.
    #[error("domain qualifiers are not supported by this role manager")]
    DomainNotSupported,

    /// The operation is not provided by this backend.
    #[error("{operation} is not implemented by this role manager")]
    NotImplemented { operation: &'static str },

    /// The backend call failed. The original error is kept as the source.
    #[error("role backend request failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RoleManagerError {
    /// Wrap a backend failure, keeping it as the error source.
    #[must_use]
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}
