//! The installed composite schema and its delegation rules.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphql_gateway_sdk::{OperationKind, RelationDefinition, ServiceIdentity};
use serde_json::{Map, Value};
use tracing::debug;

use super::bindings::bind_arguments;
use super::error::DomainError;
use super::proxy::RemoteProxy;
use super::sdl::{QUERY_TYPE, TypeSystemDocument};

/// How a relationship field is resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationBinding {
    /// Service whose relationship fragment declared the field.
    pub declared_by: ServiceIdentity,
    /// `None` when the service announced no matching relation definition.
    pub definition: Option<RelationDefinition>,
}

/// Merged, deterministic type system plus delegation rules.
///
/// A composite is immutable once built; the controller replaces it wholesale.
#[derive(Debug)]
pub struct CompositeSchema {
    document: TypeSystemDocument,
    printed: String,
    root_fields: BTreeMap<(OperationKind, String), ServiceIdentity>,
    relations: BTreeMap<(String, String), RelationBinding>,
    proxies: BTreeMap<ServiceIdentity, Arc<RemoteProxy>>,
}

impl CompositeSchema {
    pub(crate) fn new(
        document: TypeSystemDocument,
        root_fields: BTreeMap<(OperationKind, String), ServiceIdentity>,
        relations: BTreeMap<(String, String), RelationBinding>,
        proxies: BTreeMap<ServiceIdentity, Arc<RemoteProxy>>,
    ) -> Self {
        let printed = document.to_string();
        Self {
            document,
            printed,
            root_fields,
            relations,
            proxies,
        }
    }

    #[must_use]
    pub fn document(&self) -> &TypeSystemDocument {
        &self.document
    }

    /// Canonical printed form; equal registry states print identically.
    #[must_use]
    pub fn printed(&self) -> &str {
        &self.printed
    }

    /// Root `Query` field names in schema order.
    #[must_use]
    pub fn query_field_names(&self) -> Vec<&str> {
        self.document
            .get(QUERY_TYPE)
            .map(|query| query.fields.iter().map(|f| f.name.as_str()).collect())
            .unwrap_or_default()
    }

    /// Identities whose remote schemas took part in this composition.
    pub fn services(&self) -> impl Iterator<Item = &ServiceIdentity> {
        self.proxies.keys()
    }

    #[must_use]
    pub fn root_owner(&self, kind: OperationKind, field: &str) -> Option<&ServiceIdentity> {
        self.root_fields.get(&(kind, field.to_owned()))
    }

    #[must_use]
    pub fn relation(&self, type_name: &str, field: &str) -> Option<&RelationBinding> {
        self.relations.get(&(type_name.to_owned(), field.to_owned()))
    }

    /// Delegate a root field to the service that owns it.
    ///
    /// # Errors
    /// `UnknownRootField` if no service provides the field, `Remote` if the call fails.
    pub async fn resolve_root(
        &self,
        kind: OperationKind,
        field: &str,
        args: Map<String, Value>,
    ) -> Result<Value, DomainError> {
        let proxy = self
            .root_owner(kind, field)
            .and_then(|owner| self.proxies.get(owner))
            .ok_or_else(|| DomainError::UnknownRootField {
                kind,
                field: field.to_owned(),
            })?;
        proxy.invoke(kind, field, args).await
    }

    /// Resolve a relationship field of `parent` by delegating its remote operation.
    ///
    /// The operation runs on the service that owns it as a root field, or on
    /// the declaring service when nobody does.
    ///
    /// # Errors
    /// `UnresolvableField` if the field has no relation definition,
    /// `UnknownRootField` if no proxy can serve the operation, `Remote` if the call fails.
    pub async fn resolve_relation(
        &self,
        type_name: &str,
        field: &str,
        parent: &Value,
        field_args: &Map<String, Value>,
    ) -> Result<Value, DomainError> {
        let unresolvable = || DomainError::UnresolvableField {
            type_name: type_name.to_owned(),
            field: field.to_owned(),
        };
        let binding = self.relation(type_name, field).ok_or_else(unresolvable)?;
        let definition = binding.definition.as_ref().ok_or_else(unresolvable)?;

        let target = self
            .root_owner(definition.kind, &definition.remote_operation)
            .unwrap_or(&binding.declared_by);
        let proxy = self
            .proxies
            .get(target)
            .ok_or_else(|| DomainError::UnknownRootField {
                kind: definition.kind,
                field: definition.remote_operation.clone(),
            })?;

        let args = bind_arguments(&definition.argument_bindings, parent, field_args);
        debug!(
            relation = %format!("{type_name}.{field}"),
            target = %target,
            operation = %definition.remote_operation,
            "Resolving relationship field"
        );
        proxy
            .invoke(definition.kind, &definition.remote_operation, args)
            .await
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::domain::test_support::{StubLink, stub_proxy_with};
    use serde_json::json;

    fn composite(link: &Arc<StubLink>) -> CompositeSchema {
        let author = stub_proxy_with(
            "Author",
            "type Author { id: ID! }\ntype Query { author(authorId: ID): Author }",
            Arc::clone(link),
        );
        let book = stub_proxy_with("Book", "type Book { id: ID! }", Arc::clone(link));

        let mut root_fields = BTreeMap::new();
        root_fields.insert(
            (OperationKind::Query, "author".to_owned()),
            ServiceIdentity::from("Author"),
        );

        let mut relations = BTreeMap::new();
        relations.insert(
            ("Book".to_owned(), "author".to_owned()),
            RelationBinding {
                declared_by: ServiceIdentity::from("Book"),
                definition: Some(RelationDefinition::query("author").bind("authorId", "parent.id")),
            },
        );
        relations.insert(
            ("Book".to_owned(), "similar".to_owned()),
            RelationBinding {
                declared_by: ServiceIdentity::from("Book"),
                definition: Some(RelationDefinition::query("similarBooks")),
            },
        );
        relations.insert(
            ("Book".to_owned(), "reviews".to_owned()),
            RelationBinding {
                declared_by: ServiceIdentity::from("Book"),
                definition: None,
            },
        );

        let mut proxies = BTreeMap::new();
        proxies.insert(ServiceIdentity::from("Author"), author);
        proxies.insert(ServiceIdentity::from("Book"), book);

        let document = TypeSystemDocument::parse(
            "type Book { id: ID! }\ntype Query { books: [Book] author(authorId: ID): Author }\ntype Author { id: ID! }",
        )
        .unwrap();
        CompositeSchema::new(document, root_fields, relations, proxies)
    }

    #[tokio::test]
    async fn test_relation_invokes_owner_with_bound_args() {
        let link = Arc::new(StubLink::default());
        let schema = composite(&link);

        let result = schema
            .resolve_relation("Book", "author", &json!({ "id": 7, "title": "Dune" }), &Map::new())
            .await
            .unwrap();
        assert_eq!(result["service"], "Author");

        let calls = link.calls.lock();
        assert_eq!(calls.len(), 1);
        let (identity, kind, operation, args) = &calls[0];
        assert_eq!(identity, "Author");
        assert_eq!(*kind, OperationKind::Query);
        assert_eq!(operation, "author");
        assert_eq!(args.get("authorId"), Some(&json!(7)));
    }

    #[tokio::test]
    async fn test_unowned_operation_falls_back_to_declaring_service() {
        let link = Arc::new(StubLink::default());
        let schema = composite(&link);

        let result = schema
            .resolve_relation("Book", "similar", &json!({ "id": 1 }), &Map::new())
            .await
            .unwrap();
        assert_eq!(result["service"], "Book");
        assert_eq!(result["operation"], "similarBooks");
    }

    #[tokio::test]
    async fn test_missing_definition_is_unresolvable() {
        let link = Arc::new(StubLink::default());
        let schema = composite(&link);

        for field in ["reviews", "unknown"] {
            let err = schema
                .resolve_relation("Book", field, &json!({}), &Map::new())
                .await
                .unwrap_err();
            assert!(matches!(err, DomainError::UnresolvableField { .. }), "{field}");
        }
        assert!(link.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_root() {
        let link = Arc::new(StubLink::default());
        let schema = composite(&link);

        let mut args = Map::new();
        args.insert("authorId".to_owned(), json!(3));
        let result = schema
            .resolve_root(OperationKind::Query, "author", args)
            .await
            .unwrap();
        assert_eq!(result["args"]["authorId"], 3);

        let err = schema
            .resolve_root(OperationKind::Mutation, "author", Map::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UnknownRootField { .. }));
    }

    #[test]
    fn test_printed_form_and_introspection() {
        let link = Arc::new(StubLink::default());
        let schema = composite(&link);
        assert_eq!(schema.printed(), schema.document().to_string());
        assert_eq!(schema.query_field_names(), vec!["books", "author"]);
        assert_eq!(
            schema.services().map(ServiceIdentity::as_str).collect::<Vec<_>>(),
            vec!["Author", "Book"]
        );
    }
}
