//! Output ports toward the external stitching and execution collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use graphql_gateway_sdk::{GatewayError, GraphqlRequest, ServiceIdentity};
use serde_json::Value;

use super::composite::CompositeSchema;
use super::error::DomainError;
use super::sdl::TypeSystemDocument;

/// Documents handed to the stitcher, each tagged with the identity that owns it.
///
/// Both lists are in identity order.
#[derive(Debug, Default)]
pub struct StitchInput<'a> {
    /// Remote schemas of composition-eligible services.
    pub fragments: Vec<(&'a ServiceIdentity, &'a TypeSystemDocument)>,
    /// Non-empty relationship fragments.
    pub extensions: Vec<(&'a ServiceIdentity, &'a TypeSystemDocument)>,
}

/// Merges fragment type definitions into one type system.
pub trait SchemaStitcher: Send + Sync {
    /// # Errors
    /// Returns `DomainError::Composition` if the inputs cannot be merged.
    fn stitch(&self, input: &StitchInput<'_>) -> Result<TypeSystemDocument, DomainError>;
}

/// Executes a GraphQL request against an installed composite schema.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// # Errors
    /// Returns the engine's error for requests that fail to validate or execute.
    async fn execute(
        &self,
        schema: Arc<CompositeSchema>,
        request: GraphqlRequest,
    ) -> Result<Value, GatewayError>;
}
