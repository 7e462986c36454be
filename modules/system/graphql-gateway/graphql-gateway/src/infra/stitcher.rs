//! Default schema stitcher: merges type definitions by name.

use graphql_gateway_sdk::ServiceIdentity;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::ports::{SchemaStitcher, StitchInput};
use crate::domain::sdl::{TypeDefinition, TypeRef, TypeSystemDocument, is_builtin_scalar};

/// Merges fragments in input order.
///
/// Same-named types of the same kind have their members unioned; the first
/// definition of a field wins. Extensions are applied after every base
/// definition is in place and must target a known type of the same kind.
/// Every referenced type must be defined somewhere in the result.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergingStitcher;

impl SchemaStitcher for MergingStitcher {
    fn stitch(&self, input: &StitchInput<'_>) -> Result<TypeSystemDocument, DomainError> {
        let sources = || input.fragments.iter().chain(input.extensions.iter());
        let mut merged = TypeSystemDocument::default();

        for (identity, document) in sources() {
            for def in document.definitions.iter().filter(|d| !d.is_extension) {
                merge_definition(&mut merged, identity, def)?;
            }
        }
        for (identity, document) in sources() {
            for def in document.definitions.iter().filter(|d| d.is_extension) {
                apply_extension(&mut merged, identity, def)?;
            }
        }

        validate_references(&merged)?;
        Ok(merged)
    }
}

fn merge_definition(
    merged: &mut TypeSystemDocument,
    identity: &ServiceIdentity,
    def: &TypeDefinition,
) -> Result<(), DomainError> {
    match merged.get_mut(&def.name) {
        None => {
            merged.definitions.push(def.clone());
            Ok(())
        }
        Some(existing) if existing.kind != def.kind => Err(DomainError::composition(format!(
            "'{identity}' declares {} {} but it is already a {}",
            def.kind.keyword(),
            def.name,
            existing.kind.keyword()
        ))),
        Some(existing) => {
            merge_members(existing, def, identity);
            Ok(())
        }
    }
}

fn apply_extension(
    merged: &mut TypeSystemDocument,
    identity: &ServiceIdentity,
    ext: &TypeDefinition,
) -> Result<(), DomainError> {
    let Some(existing) = merged.get_mut(&ext.name) else {
        return Err(DomainError::composition(format!(
            "'{identity}' extends unknown type {}",
            ext.name
        )));
    };
    if existing.kind != ext.kind {
        return Err(DomainError::composition(format!(
            "'{identity}' extends {} as {} but it is a {}",
            ext.name,
            ext.kind.keyword(),
            existing.kind.keyword()
        )));
    }
    merge_members(existing, ext, identity);
    Ok(())
}

fn merge_members(target: &mut TypeDefinition, source: &TypeDefinition, identity: &ServiceIdentity) {
    for field in &source.fields {
        match target.field(&field.name) {
            Some(kept) => {
                if kept != field {
                    warn!(
                        identity = %identity,
                        field = %format!("{}.{}", target.name, field.name),
                        kept = %kept,
                        ignored = %field,
                        "Conflicting field definition ignored"
                    );
                }
            }
            None => target.fields.push(field.clone()),
        }
    }
    for input in &source.input_fields {
        if !target.input_fields.iter().any(|f| f.name == input.name) {
            target.input_fields.push(input.clone());
        }
    }
    union_into(&mut target.implements, &source.implements);
    union_into(&mut target.enum_values, &source.enum_values);
    union_into(&mut target.union_members, &source.union_members);
    for directive in &source.directives {
        if !target.directives.contains(directive) {
            target.directives.push(directive.clone());
        }
    }
}

fn union_into(target: &mut Vec<String>, source: &[String]) {
    for item in source {
        if !target.contains(item) {
            target.push(item.clone());
        }
    }
}

fn validate_references(document: &TypeSystemDocument) -> Result<(), DomainError> {
    let is_known = |ty: &TypeRef| {
        let name = ty.named_type();
        is_builtin_scalar(name) || document.get(name).is_some()
    };

    for def in &document.definitions {
        for field in &def.fields {
            if !is_known(&field.ty) {
                return Err(DomainError::composition(format!(
                    "{}.{} returns undefined type {}",
                    def.name,
                    field.name,
                    field.ty.named_type()
                )));
            }
            if let Some(arg) = field.arguments.iter().find(|a| !is_known(&a.ty)) {
                return Err(DomainError::composition(format!(
                    "argument {}.{}({}) has undefined type {}",
                    def.name,
                    field.name,
                    arg.name,
                    arg.ty.named_type()
                )));
            }
        }
        if let Some(input) = def.input_fields.iter().find(|f| !is_known(&f.ty)) {
            return Err(DomainError::composition(format!(
                "{}.{} has undefined type {}",
                def.name,
                input.name,
                input.ty.named_type()
            )));
        }
    }
    Ok(())
}
