//! Relationship extraction from relationship fragments.

use std::collections::BTreeSet;

use super::sdl::{TypeSystemDocument, is_builtin_scalar, is_root_operation_type};

/// A cross-fragment field declared by a relationship fragment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RelationshipField {
    pub type_name: String,
    pub field: String,
}

impl RelationshipField {
    /// Keys a relation definition may be stored under, most specific first.
    #[must_use]
    pub fn definition_keys(&self) -> [String; 2] {
        [format!("{}.{}", self.type_name, self.field), self.field.clone()]
    }
}

/// Returns the type names a relationship fragment depends on.
///
/// The extended types and the named return types of the extension fields
/// count. Argument types, built-in scalars and root operation types do not.
#[must_use]
pub fn extract_referenced_types(relationships: &TypeSystemDocument) -> BTreeSet<String> {
    let mut referenced = BTreeSet::new();
    let mut note = |name: &str| {
        if !is_builtin_scalar(name) && !is_root_operation_type(name) {
            referenced.insert(name.to_owned());
        }
    };
    for def in &relationships.definitions {
        if def.is_extension {
            note(&def.name);
        }
        for field in &def.fields {
            note(field.ty.named_type());
        }
    }
    referenced
}

/// Lists every field added by a relationship fragment, in document order.
#[must_use]
pub fn relationship_fields(relationships: &TypeSystemDocument) -> Vec<RelationshipField> {
    relationships
        .definitions
        .iter()
        .flat_map(|def| {
            def.fields.iter().map(|field| RelationshipField {
                type_name: def.name.clone(),
                field: field.name.clone(),
            })
        })
        .collect()
}
