use graphql_gateway_sdk::{GatewayError, OperationKind, ServiceIdentity};

use super::sdl::ParseError;

/// Domain-level errors for the gateway
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid schema fragment from '{identity}': {source}")]
    InvalidFragment {
        identity: ServiceIdentity,
        #[source]
        source: ParseError,
    },

    #[error("Invalid relationship fragment from '{identity}': {source}")]
    InvalidRelationshipFragment {
        identity: ServiceIdentity,
        #[source]
        source: ParseError,
    },

    #[error("Failed to build remote schema for '{identity}': {reason}")]
    BuildFailure {
        identity: ServiceIdentity,
        reason: String,
    },

    #[error("Composition failed: {0}")]
    Composition(String),

    #[error("Field {type_name}.{field} has no relation definition")]
    UnresolvableField { type_name: String, field: String },

    #[error("No service owns {kind} field '{field}'")]
    UnknownRootField { kind: OperationKind, field: String },

    #[error("Remote call to '{identity}' failed: {message}")]
    Remote {
        identity: ServiceIdentity,
        message: String,
    },
}

impl DomainError {
    #[must_use]
    pub fn build_failure(identity: &ServiceIdentity, reason: impl std::fmt::Display) -> Self {
        Self::BuildFailure {
            identity: identity.clone(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn composition(message: impl Into<String>) -> Self {
        Self::Composition(message.into())
    }

    #[must_use]
    pub fn remote(identity: &ServiceIdentity, error: &anyhow::Error) -> Self {
        Self::Remote {
            identity: identity.clone(),
            message: format!("{error:#}"),
        }
    }
}

impl From<DomainError> for GatewayError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::InvalidFragment { identity, source }
            | DomainError::InvalidRelationshipFragment { identity, source } => {
                Self::InvalidFragment {
                    identity: identity.to_string(),
                    reason: source.to_string(),
                }
            }
            DomainError::BuildFailure { identity, reason } => {
                Self::BuildFailure {
                    identity: identity.to_string(),
                    reason,
                }
            }
            DomainError::Composition(msg) => Self::Composition(msg),
            DomainError::UnresolvableField { type_name, field } => {
                Self::UnresolvableField { type_name, field }
            }
            DomainError::UnknownRootField { kind, field } => {
                Self::Internal(format!("No service owns {kind} field '{field}'"))
            }
            DomainError::Remote { identity, message } => Self::Remote {
                identity: identity.to_string(),
                message,
            },
        }
    }
}
