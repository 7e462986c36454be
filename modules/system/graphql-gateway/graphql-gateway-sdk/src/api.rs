//! API traits for the `graphql-gateway` module.

use anyhow::Result;
use async_trait::async_trait;

use crate::error::GatewayError;
use crate::models::{
    GatewayState, GraphqlRequest, OperationKind, ServiceIdentity, TypeSystemDescription,
};

/// Public API trait for the `graphql-gateway` module.
///
/// Implemented in-process by `GraphqlGatewayLocalClient`:
/// ```ignore
/// let client: Arc<dyn GraphqlGatewayClient> = Arc::new(GraphqlGatewayLocalClient::new(controller));
/// let data = client.graphql(GraphqlRequest::new("{ authors { name } }")).await?;
/// ```
#[async_trait]
pub trait GraphqlGatewayClient: Send + Sync {
    /// Execute a GraphQL request against the installed composite schema.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotReady` if no composition has succeeded yet,
    /// or the execution engine's error otherwise.
    async fn graphql(&self, request: GraphqlRequest) -> Result<serde_json::Value, GatewayError>;

    /// Current convergence state.
    async fn state(&self) -> GatewayState;

    /// Deterministic printed form of the installed composite schema.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::NotReady` if no composite schema is installed.
    async fn schema_sdl(&self) -> Result<String, GatewayError>;
}

/// Contract toward remote services, implemented by the RPC/link transport.
///
/// The gateway introspects a service once per (re)connect and then invokes
/// its root operations when resolving delegated fields.
#[async_trait]
pub trait RemoteLink: Send + Sync {
    /// Fetch the type-system description of the remote executable schema.
    async fn introspect(&self, identity: &ServiceIdentity) -> Result<TypeSystemDescription>;

    /// Invoke a root operation on the remote service.
    async fn invoke(
        &self,
        identity: &ServiceIdentity,
        kind: OperationKind,
        operation: &str,
        args: serde_json::Map<String, serde_json::Value>,
    ) -> Result<serde_json::Value>;
}
