//! Schema composition over the composition-eligible part of the registry.

use std::collections::BTreeMap;
use std::sync::Arc;

use graphql_gateway_sdk::OperationKind;
use tracing::{debug, warn};

use super::composite::{CompositeSchema, RelationBinding};
use super::error::DomainError;
use super::ports::{SchemaStitcher, StitchInput};
use super::registry::ServiceRegistry;
use super::relationships::relationship_fields;
use super::sdl::{QUERY_TYPE, TypeSystemDocument};

pub struct SchemaComposer {
    stitcher: Arc<dyn SchemaStitcher>,
}

impl SchemaComposer {
    #[must_use]
    pub fn new(stitcher: Arc<dyn SchemaStitcher>) -> Self {
        Self { stitcher }
    }

    /// Compose every built remote schema and every relationship fragment.
    ///
    /// Root field owners and relationship bindings are first-wins in identity
    /// order. The root query fields are sorted by name afterwards so that two
    /// compositions over an equivalent registry print identically.
    ///
    /// # Errors
    /// Returns `DomainError::Composition` if no service is eligible or the
    /// stitcher rejects the inputs.
    pub fn compose(&self, registry: &ServiceRegistry) -> Result<CompositeSchema, DomainError> {
        let proxies: BTreeMap<_, _> = registry
            .eligible()
            .filter_map(|service| {
                service
                    .remote_proxy()
                    .map(|proxy| (service.identity().clone(), Arc::clone(proxy)))
            })
            .collect();
        if proxies.is_empty() {
            return Err(DomainError::composition("no composition-eligible services"));
        }

        let input = StitchInput {
            fragments: proxies
                .iter()
                .map(|(identity, proxy)| (identity, proxy.schema()))
                .collect(),
            extensions: registry
                .iter()
                .filter_map(|service| service.relationships().map(|doc| (service.identity(), doc)))
                .collect(),
        };
        let mut document = self.stitcher.stitch(&input)?;
        sort_query_fields(&mut document);

        let mut root_fields = BTreeMap::new();
        for (identity, proxy) in &proxies {
            for kind in [OperationKind::Query, OperationKind::Mutation] {
                for field in proxy.schema().root_fields(kind.root_type_name()) {
                    root_fields
                        .entry((kind, field.name.clone()))
                        .or_insert_with(|| identity.clone());
                }
            }
        }

        let mut relations: BTreeMap<(String, String), RelationBinding> = BTreeMap::new();
        for service in registry.iter() {
            let Some(doc) = service.relationships() else {
                continue;
            };
            for field in relationship_fields(doc) {
                let definition = service.relation_definition(&field).cloned();
                let key = (field.type_name, field.field);
                if let Some(existing) = relations.get(&key) {
                    warn!(
                        field = %format!("{}.{}", key.0, key.1),
                        kept = %existing.declared_by,
                        ignored = %service.identity(),
                        "Relationship field declared by more than one service"
                    );
                    continue;
                }
                relations.insert(
                    key,
                    RelationBinding {
                        declared_by: service.identity().clone(),
                        definition,
                    },
                );
            }
        }

        debug!(
            services = proxies.len(),
            root_fields = root_fields.len(),
            relations = relations.len(),
            "Composed schema"
        );
        Ok(CompositeSchema::new(document, root_fields, relations, proxies))
    }
}

fn sort_query_fields(document: &mut TypeSystemDocument) {
    if let Some(query) = document.get_mut(QUERY_TYPE) {
        query.fields.sort_by(|a, b| a.name.cmp(&b.name));
    }
}
