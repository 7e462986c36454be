//! Executable proxy for one remote service.

use std::fmt;
use std::sync::Arc;

use graphql_gateway_sdk::{OperationKind, RemoteLink, ServiceIdentity};
use serde_json::{Map, Value};
use tracing::debug;

use super::error::DomainError;
use super::sdl::TypeSystemDocument;

/// Callable proxy for a remote service, built from its introspected schema.
pub struct RemoteProxy {
    identity: ServiceIdentity,
    schema: TypeSystemDocument,
    link: Arc<dyn RemoteLink>,
}

impl fmt::Debug for RemoteProxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteProxy")
            .field("identity", &self.identity)
            .field("types", &self.schema.definitions.len())
            .finish_non_exhaustive()
    }
}

impl RemoteProxy {
    #[must_use]
    pub fn new(
        identity: ServiceIdentity,
        schema: TypeSystemDocument,
        link: Arc<dyn RemoteLink>,
    ) -> Self {
        Self {
            identity,
            schema,
            link,
        }
    }

    #[must_use]
    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// Introspected remote schema.
    #[must_use]
    pub fn schema(&self) -> &TypeSystemDocument {
        &self.schema
    }

    /// Invoke a root operation on the remote service.
    ///
    /// # Errors
    /// Returns `DomainError::Remote` if the link reports a failure.
    pub async fn invoke(
        &self,
        kind: OperationKind,
        operation: &str,
        args: Map<String, Value>,
    ) -> Result<Value, DomainError> {
        debug!(identity = %self.identity, %kind, operation, "Delegating remote operation");
        self.link
            .invoke(&self.identity, kind, operation, args)
            .await
            .map_err(|e| DomainError::remote(&self.identity, &e))
    }
}
