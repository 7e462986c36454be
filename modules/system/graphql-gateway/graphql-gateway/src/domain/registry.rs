//! Service registry: last-known capability and remote proxy per live service.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use graphql_gateway_sdk::{
    GraphqlCapability, RegistrationOutcome, RelationDefinition, ServiceAnnouncement,
    ServiceIdentity,
};
use tracing::{debug, warn};

use super::error::DomainError;
use super::proxy::RemoteProxy;
use super::relationships::{RelationshipField, relationship_fields};
use super::sdl::TypeSystemDocument;

/// A live service as seen by the gateway.
///
/// `remote_proxy` is `None` until the remote build step succeeds; only services
/// with a proxy take part in composition.
#[derive(Debug)]
pub struct RegisteredService {
    identity: ServiceIdentity,
    capability: GraphqlCapability,
    schema: TypeSystemDocument,
    relationships: Option<TypeSystemDocument>,
    remote_proxy: Option<Arc<RemoteProxy>>,
}

impl RegisteredService {
    #[must_use]
    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    #[must_use]
    pub fn capability(&self) -> &GraphqlCapability {
        &self.capability
    }

    /// Parsed announced fragment.
    #[must_use]
    pub fn schema(&self) -> &TypeSystemDocument {
        &self.schema
    }

    /// Parsed relationship fragment, if the service announced a non-empty one.
    #[must_use]
    pub fn relationships(&self) -> Option<&TypeSystemDocument> {
        self.relationships.as_ref()
    }

    #[must_use]
    pub fn remote_proxy(&self) -> Option<&Arc<RemoteProxy>> {
        self.remote_proxy.as_ref()
    }

    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.remote_proxy.is_some()
    }

    /// Object type names of the announced fragment, without root operation types.
    #[must_use]
    pub fn primary_types(&self) -> BTreeSet<String> {
        self.schema.primary_type_names()
    }

    /// Resolution rule for a relationship field, looked up by `Type.field` then `field`.
    #[must_use]
    pub fn relation_definition(&self, field: &RelationshipField) -> Option<&RelationDefinition> {
        field
            .definition_keys()
            .iter()
            .find_map(|key| self.capability.relation_definitions.get(key))
    }

    /// Relationship fields without a matching relation definition.
    #[must_use]
    pub fn unresolved_relationship_fields(&self) -> Vec<RelationshipField> {
        self.relationships
            .as_ref()
            .map(relationship_fields)
            .unwrap_or_default()
            .into_iter()
            .filter(|field| self.relation_definition(field).is_none())
            .collect()
    }
}

/// Registry of live services keyed by identity.
///
/// Iteration is ordered by identity so that everything derived from the
/// registry is deterministic.
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    services: BTreeMap<ServiceIdentity, RegisteredService>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new service or update an existing one.
    ///
    /// An announcement equal to the stored capability (fragment text,
    /// relationship text and relation definitions) is `Unchanged` and leaves the
    /// record untouched. A changed record loses its remote proxy until it is
    /// rebuilt.
    ///
    /// # Errors
    /// Returns `InvalidFragment` / `InvalidRelationshipFragment` if the
    /// announced documents do not parse; the stored record is left as it was.
    pub fn register_or_update(
        &mut self,
        announcement: ServiceAnnouncement,
    ) -> Result<RegistrationOutcome, DomainError> {
        let ServiceAnnouncement {
            identity,
            capability,
        } = announcement;

        if let Some(existing) = self.services.get(&identity)
            && existing.capability == capability
        {
            debug!(identity = %identity, "Duplicate announcement, registry unchanged");
            return Ok(RegistrationOutcome::Unchanged);
        }

        let schema = TypeSystemDocument::parse(&capability.fragment).map_err(|source| {
            DomainError::InvalidFragment {
                identity: identity.clone(),
                source,
            }
        })?;

        let relationships = capability
            .relationship_fragment
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(TypeSystemDocument::parse)
            .transpose()
            .map_err(|source| DomainError::InvalidRelationshipFragment {
                identity: identity.clone(),
                source,
            })?;

        let service = RegisteredService {
            identity: identity.clone(),
            capability,
            schema,
            relationships,
            remote_proxy: None,
        };

        for field in service.unresolved_relationship_fields() {
            warn!(
                identity = %identity,
                field = %format!("{}.{}", field.type_name, field.field),
                "Relationship field has no relation definition and cannot be resolved"
            );
        }

        self.services.insert(identity, service);
        Ok(RegistrationOutcome::Changed)
    }

    pub fn remove(&mut self, identity: &str) -> Option<RegisteredService> {
        self.services.remove(identity)
    }

    /// Attach a freshly built proxy. Returns `false` if the identity is no longer registered.
    pub fn attach_proxy(&mut self, identity: &str, proxy: Arc<RemoteProxy>) -> bool {
        match self.services.get_mut(identity) {
            Some(service) => {
                service.remote_proxy = Some(proxy);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, identity: &str) -> Option<&RegisteredService> {
        self.services.get(identity)
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.services.contains_key(identity)
    }

    /// Identities of composition-eligible services.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ServiceIdentity> {
        self.eligible().map(|s| s.identity.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegisteredService> {
        self.services.values()
    }

    /// Services with a populated remote proxy, in identity order.
    pub fn eligible(&self) -> impl Iterator<Item = &RegisteredService> {
        self.services.values().filter(|s| s.is_eligible())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn clear(&mut self) {
        self.services.clear();
    }
}
