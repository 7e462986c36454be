//! Stubs shared by domain unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use graphql_gateway_sdk::{OperationKind, RemoteLink, ServiceIdentity, TypeSystemDescription};
use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use super::proxy::RemoteProxy;
use super::sdl::TypeSystemDocument;

/// Link that records invocations and echoes them back as the result.
///
/// Introspection only succeeds for identities given to [`StubLink::serving`].
#[derive(Default)]
pub struct StubLink {
    pub calls: Mutex<Vec<(String, OperationKind, String, Map<String, Value>)>>,
    schemas: HashMap<String, String>,
}

impl StubLink {
    pub fn serving(schemas: &[(&str, &str)]) -> Self {
        Self {
            calls: Mutex::default(),
            schemas: schemas
                .iter()
                .map(|(identity, sdl)| ((*identity).to_owned(), (*sdl).to_owned()))
                .collect(),
        }
    }
}

#[async_trait]
impl RemoteLink for StubLink {
    async fn introspect(&self, identity: &ServiceIdentity) -> anyhow::Result<TypeSystemDescription> {
        match self.schemas.get(identity.as_str()) {
            Some(sdl) => Ok(TypeSystemDescription::new(sdl.clone())),
            None => anyhow::bail!("no introspection for {identity}"),
        }
    }

    async fn invoke(
        &self,
        identity: &ServiceIdentity,
        kind: OperationKind,
        operation: &str,
        args: Map<String, Value>,
    ) -> anyhow::Result<Value> {
        self.calls
            .lock()
            .push((identity.to_string(), kind, operation.to_owned(), args.clone()));
        Ok(json!({ "service": identity.as_str(), "operation": operation, "args": args }))
    }
}

pub fn stub_proxy(identity: &str, sdl: &str) -> Arc<RemoteProxy> {
    stub_proxy_with(identity, sdl, Arc::new(StubLink::default()))
}

pub fn stub_proxy_with(identity: &str, sdl: &str, link: Arc<StubLink>) -> Arc<RemoteProxy> {
    let schema = TypeSystemDocument::parse(sdl).unwrap_or_default();
    Arc::new(RemoteProxy::new(ServiceIdentity::from(identity), schema, link))
}
