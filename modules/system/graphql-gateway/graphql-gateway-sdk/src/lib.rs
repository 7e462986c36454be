#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! GraphQL Gateway SDK
//!
//! This crate provides the public API for the `graphql-gateway` module:
//! - `GraphqlGatewayClient` trait for consumers that run queries against the composite schema
//! - `RemoteLink` trait implemented by the transport that reaches remote services
//! - Lifecycle event and capability models announced by services
//! - `GatewayError` for error handling
//!
//! ## Usage
//!
//! Consumers hold the client as a trait object, typically the gateway's local client:
//! ```ignore
//! use graphql_gateway_sdk::{GraphqlGatewayClient, GraphqlRequest};
//!
//! let client: Arc<dyn GraphqlGatewayClient> = Arc::new(GraphqlGatewayLocalClient::new(controller));
//! let data = client.graphql(GraphqlRequest::new("{ books { id } }")).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root for convenience
pub use api::{GraphqlGatewayClient, RemoteLink};
pub use error::GatewayError;
pub use models::{
    GatewayState, GraphqlCapability, GraphqlRequest, LifecycleEvent, OperationKind,
    RegistrationOutcome, RelationDefinition, ServiceAnnouncement, ServiceIdentity,
    TypeSystemDescription,
};
