//! Builds remote proxies for newly registered services.

use std::sync::Arc;

use graphql_gateway_sdk::{RemoteLink, ServiceIdentity};
use tracing::{debug, warn};

use super::error::DomainError;
use super::proxy::RemoteProxy;
use super::sdl::TypeSystemDocument;

/// Introspects a remote service through the link layer and wraps it as a proxy.
///
/// A failed build only affects the identity being built. There is no retry
/// here; the next `connected` event for the identity triggers a new build.
pub struct RemoteFragmentBuilder {
    link: Arc<dyn RemoteLink>,
}

impl RemoteFragmentBuilder {
    #[must_use]
    pub fn new(link: Arc<dyn RemoteLink>) -> Self {
        Self { link }
    }

    /// # Errors
    /// Returns `DomainError::BuildFailure` if introspection fails or returns an
    /// unparsable type-system description.
    pub async fn build(&self, identity: &ServiceIdentity) -> Result<RemoteProxy, DomainError> {
        debug!(identity = %identity, "Introspecting remote schema");

        let description = self.link.introspect(identity).await.map_err(|e| {
            warn!(identity = %identity, error = %e, "Remote introspection failed");
            DomainError::build_failure(identity, format!("{e:#}"))
        })?;

        let schema = TypeSystemDocument::parse(&description.sdl).map_err(|e| {
            warn!(identity = %identity, error = %e, "Remote schema does not parse");
            DomainError::build_failure(identity, format!("introspected schema is invalid: {e}"))
        })?;

        Ok(RemoteProxy::new(identity.clone(), schema, Arc::clone(&self.link)))
    }
}
