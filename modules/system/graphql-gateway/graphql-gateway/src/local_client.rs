//! Local client implementing the `GraphqlGatewayClient` trait.

use std::sync::Arc;

use async_trait::async_trait;
use graphql_gateway_sdk::{GatewayError, GatewayState, GraphqlGatewayClient, GraphqlRequest};

use crate::domain::controller::GatewayController;

/// Local client for the GraphQL gateway module.
///
/// Delegates to the controller. Construct it directly from the shared
/// controller and hand it out as `Arc<dyn GraphqlGatewayClient>`.
pub struct GraphqlGatewayLocalClient {
    controller: Arc<GatewayController>,
}

impl GraphqlGatewayLocalClient {
    #[must_use]
    pub fn new(controller: Arc<GatewayController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl GraphqlGatewayClient for GraphqlGatewayLocalClient {
    async fn graphql(&self, request: GraphqlRequest) -> Result<serde_json::Value, GatewayError> {
        self.controller.graphql(request).await
    }

    async fn state(&self) -> GatewayState {
        self.controller.state().await
    }

    async fn schema_sdl(&self) -> Result<String, GatewayError> {
        self.controller
            .composite()
            .map(|schema| schema.printed().to_owned())
            .ok_or(GatewayError::NotReady)
    }
}
