//! Dependency tracking: which referenced types are announced and which are still missing.

use std::collections::BTreeSet;

use super::registry::ServiceRegistry;
use super::relationships::extract_referenced_types;

/// Derived view of the registry, recomputed on every registry change.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DependencyTracker {
    discovered: BTreeSet<String>,
    required: BTreeSet<String>,
}

impl DependencyTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute both sets from the registry.
    ///
    /// `discovered` only counts services whose remote proxy is built;
    /// `required` counts every registered relationship fragment, minus names
    /// some registered fragment defines as a non-object type.
    pub fn update(&mut self, registry: &ServiceRegistry) {
        self.discovered = registry
            .eligible()
            .flat_map(|service| service.primary_types())
            .collect();

        let non_object: BTreeSet<String> = registry
            .iter()
            .flat_map(|service| {
                let mut names = service.schema().non_object_type_names();
                if let Some(relationships) = service.relationships() {
                    names.extend(relationships.non_object_type_names());
                }
                names
            })
            .collect();
        self.required = registry
            .iter()
            .filter_map(|service| service.relationships())
            .flat_map(extract_referenced_types)
            .filter(|name| !non_object.contains(name))
            .collect();
    }

    /// Required type names that no built service has announced yet.
    #[must_use]
    pub fn outstanding(&self) -> BTreeSet<String> {
        self.required.difference(&self.discovered).cloned().collect()
    }

    #[must_use]
    pub fn is_satisfied(&self) -> bool {
        self.required.is_subset(&self.discovered)
    }

    #[must_use]
    pub fn discovered(&self) -> &BTreeSet<String> {
        &self.discovered
    }

    #[must_use]
    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn clear(&mut self) {
        self.discovered.clear();
        self.required.clear();
    }
}
