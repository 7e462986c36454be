//! Models announced by services and exchanged with the gateway.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a participant on the network (service or type name).
///
/// Unique key into the gateway's service registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceIdentity(String);

impl ServiceIdentity {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceIdentity {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ServiceIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for ServiceIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Kind of remote operation a relationship delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Name of the root operation type for this kind.
    #[must_use]
    pub const fn root_type_name(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query => f.write_str("query"),
            Self::Mutation => f.write_str("mutation"),
        }
    }
}

/// Resolution rule for one relationship field.
///
/// `argument_bindings` maps an argument name of the remote operation to a dotted
/// path (e.g. `parent.id`) read off the resolving parent object at call time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDefinition {
    pub kind: OperationKind,
    pub remote_operation: String,
    #[serde(default, alias = "args")]
    pub argument_bindings: BTreeMap<String, String>,
}

impl RelationDefinition {
    #[must_use]
    pub fn query(remote_operation: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Query,
            remote_operation: remote_operation.into(),
            argument_bindings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn mutation(remote_operation: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Mutation,
            remote_operation: remote_operation.into(),
            argument_bindings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn bind(mut self, argument: impl Into<String>, source_path: impl Into<String>) -> Self {
        self.argument_bindings
            .insert(argument.into(), source_path.into());
        self
    }
}

/// GraphQL capability record a service attaches when it is constructed.
///
/// The gateway depends only on this shape, never on the service internals.
/// Relation definitions are keyed by `"Type.field"` or by the bare field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlCapability {
    pub fragment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_fragment: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relation_definitions: BTreeMap<String, RelationDefinition>,
}

impl GraphqlCapability {
    #[must_use]
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            relationship_fragment: None,
            relation_definitions: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_relationships(mut self, fragment: impl Into<String>) -> Self {
        self.relationship_fragment = Some(fragment.into());
        self
    }

    #[must_use]
    pub fn with_relation(mut self, field: impl Into<String>, definition: RelationDefinition) -> Self {
        self.relation_definitions.insert(field.into(), definition);
        self
    }
}

/// Payload of a `connected` lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAnnouncement {
    pub identity: ServiceIdentity,
    #[serde(flatten)]
    pub capability: GraphqlCapability,
}

impl ServiceAnnouncement {
    #[must_use]
    pub fn new(identity: impl Into<ServiceIdentity>, capability: GraphqlCapability) -> Self {
        Self {
            identity: identity.into(),
            capability,
        }
    }
}

/// Service lifecycle event delivered by the broker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum LifecycleEvent {
    Connected(ServiceAnnouncement),
    Disconnected { identity: ServiceIdentity },
}

impl LifecycleEvent {
    #[must_use]
    pub fn identity(&self) -> &ServiceIdentity {
        match self {
            Self::Connected(announcement) => &announcement.identity,
            Self::Disconnected { identity } => identity,
        }
    }
}

/// Result of registering an announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// Fragment, relationship fragment or relation definitions differ from the stored record.
    Changed,
    /// Duplicate announcement; nothing to rebuild.
    Unchanged,
}

/// Convergence state of a gateway instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GatewayState {
    /// No service has connected yet, or the gateway was stopped.
    Idle,
    /// Some referenced types are not announced yet, or no composition succeeded.
    Partial,
    /// Every referenced type is announced and the composite is current.
    Ready,
}

/// Type-system description returned by remote introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSystemDescription {
    /// Type-system definition document of the remote executable schema.
    pub sdl: String,
}

impl TypeSystemDescription {
    #[must_use]
    pub fn new(sdl: impl Into<String>) -> Self {
        Self { sdl: sdl.into() }
    }
}

/// A `graphql` RPC call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphqlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    #[must_use]
    pub fn with_variables(mut self, variables: serde_json::Map<String, serde_json::Value>) -> Self {
        self.variables = Some(variables);
        self
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_connected_event_from_json() {
        let payload = json!({
            "event": "connected",
            "identity": "Book",
            "fragment": "type Book { id: ID! }",
            "relationshipFragment": "extend type Book { author: Author }",
            "relationDefinitions": {
                "author": {
                    "kind": "query",
                    "remoteOperation": "author",
                    "args": { "id": "parent.authorId" }
                }
            }
        });

        let event: LifecycleEvent = serde_json::from_value(payload).unwrap();
        let LifecycleEvent::Connected(announcement) = event else {
            panic!("expected connected event");
        };
        assert_eq!(announcement.identity.as_str(), "Book");
        let def = &announcement.capability.relation_definitions["author"];
        assert_eq!(def.kind, OperationKind::Query);
        assert_eq!(def.argument_bindings["id"], "parent.authorId");
    }

    #[test]
    fn test_disconnected_event_from_json() {
        let event: LifecycleEvent =
            serde_json::from_value(json!({"event": "disconnected", "identity": "Chapter"}))
                .unwrap();
        assert_eq!(event.identity().as_str(), "Chapter");
    }

    #[test]
    fn test_capability_equality_ignores_definition_order() {
        let a = GraphqlCapability::new("type A { id: ID }")
            .with_relation("x", RelationDefinition::query("x"))
            .with_relation("y", RelationDefinition::query("y"));
        let b = GraphqlCapability::new("type A { id: ID }")
            .with_relation("y", RelationDefinition::query("y"))
            .with_relation("x", RelationDefinition::query("x"));
        assert_eq!(a, b);
    }
}
