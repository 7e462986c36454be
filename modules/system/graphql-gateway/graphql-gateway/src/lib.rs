#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! GraphQL Gateway Module Implementation
//!
//! Assembles one composite GraphQL schema out of fragments announced by
//! independently deployed services and keeps it consistent as they come and go.
//! The public API is defined in `graphql-gateway-sdk` and re-exported here.
//!
//! ## Architecture
//!
//! - **Registry + dependency tracking**: every `connected` event is registered,
//!   built into a remote proxy and folded into the discovered/required type sets
//! - **Rebuild policy**: the composite is recomposed only when no required type
//!   is outstanding; otherwise the previous composite keeps serving
//! - **Startup convergence**: `start` waits, bounded by a deadline, until the
//!   dependency set is satisfied and required services are built
//! - **Local client**: `GraphqlGatewayLocalClient::new(controller)` exposes the
//!   controller as an `Arc<dyn GraphqlGatewayClient>`

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === PUBLIC API (from SDK) ===
pub use graphql_gateway_sdk::{
    GatewayError, GatewayState, GraphqlCapability, GraphqlGatewayClient, GraphqlRequest,
    LifecycleEvent, OperationKind, RelationDefinition, RemoteLink, ServiceAnnouncement,
    ServiceIdentity, TypeSystemDescription,
};

// === CONFIGURATION ===
pub mod config;
pub use config::GraphqlGatewayConfig;

pub mod local_client;
pub use local_client::GraphqlGatewayLocalClient;

pub use domain::{CompositeSchema, GatewayController, QueryExecutor, SchemaStitcher};

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

mod humantime_serde;
