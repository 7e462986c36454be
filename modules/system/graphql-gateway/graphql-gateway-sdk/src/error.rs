//! Public error types for the `graphql-gateway` module.
//!
//! These errors are safe to expose to other modules and consumers.

use thiserror::Error;

/// Errors that can be returned by the gateway.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The convergence deadline passed during `start`.
    #[error(
        "Timed out after {waited_ms}ms waiting for convergence (missing types: {missing_types:?}, missing services: {missing_services:?})"
    )]
    Timeout {
        waited_ms: u64,
        missing_types: Vec<String>,
        missing_services: Vec<String>,
    },

    /// The remote proxy for a single service could not be constructed.
    #[error("Failed to build remote schema for '{identity}': {reason}")]
    BuildFailure { identity: String, reason: String },

    /// No composite schema has been installed yet.
    #[error("Gateway not ready: no composite schema installed")]
    NotReady,

    /// An announced fragment could not be parsed.
    #[error("Invalid schema fragment from '{identity}': {reason}")]
    InvalidFragment { identity: String, reason: String },

    /// Stitching the fragments together failed.
    #[error("Schema composition failed: {0}")]
    Composition(String),

    /// A relationship field has no resolution rule.
    #[error("Field {type_name}.{field} has no relation definition")]
    UnresolvableField { type_name: String, field: String },

    /// A delegated remote operation failed.
    #[error("Remote call to '{identity}' failed: {message}")]
    Remote { identity: String, message: String },

    /// The gateway was stopped while waiting.
    #[error("Gateway stopped")]
    Stopped,

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Creates a `BuildFailure` error.
    #[must_use]
    pub fn build_failure(identity: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BuildFailure {
            identity: identity.into(),
            reason: reason.into(),
        }
    }

    /// Creates a `NotReady` error.
    #[must_use]
    pub const fn not_ready() -> Self {
        Self::NotReady
    }

    /// Creates a `Remote` error.
    #[must_use]
    pub fn remote(identity: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Remote {
            identity: identity.into(),
            message: message.into(),
        }
    }

    /// Creates an `Internal` error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns `true` if this is a build failure.
    #[must_use]
    pub const fn is_build_failure(&self) -> bool {
        matches!(self, Self::BuildFailure { .. })
    }

    /// Returns `true` if this is a not ready error.
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::NotReady)
    }

    /// Returns `true` if this is a stopped error.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
