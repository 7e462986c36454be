//! Domain layer for the GraphQL gateway module.
//!
//! Contains the discovery-and-convergence engine: registry, dependency
//! tracking, remote builds, composition and the controller driving them.

pub mod bindings;
pub mod builder;
pub mod composer;
pub mod composite;
pub mod controller;
pub mod dependencies;
pub mod error;
pub mod ports;
pub mod proxy;
pub mod registry;
pub mod relationships;
pub mod sdl;
pub mod waiter;

#[cfg(test)]
pub(crate) mod test_support;

pub use composite::CompositeSchema;
pub use controller::{DiscoveryHook, GatewayController, ServiceStatus};
pub use error::DomainError;
pub use ports::{QueryExecutor, SchemaStitcher, StitchInput};
pub use proxy::RemoteProxy;
