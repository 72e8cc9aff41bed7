// Property Model Builder
//
// Finds the holder-typed properties of a spec interface and resolves their value types.

use std::collections::{BTreeSet, HashSet};

use statestore_compiler::TypeName;

use super::validator::SpecReference;
use crate::processor::diagnostics::ProcessorError;
use crate::processor::reflection::{
    expand_alias, Property, Resolver, SourceFile, TypeNameResolver,
};

/// One recognized `name: Holder<T>` property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyModel {
    pub name: String,
    /// `T`, with nullability, arguments and projections preserved.
    pub value_type: TypeName,
}

/// Holder properties of one spec and every file their shape was read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeledProperties {
    pub properties: Vec<PropertyModel>,
    /// The spec, its supertypes and any aliases passed through on the way.
    pub origins: BTreeSet<SourceFile>,
}

/// Model every holder property visible on the spec, inherited ones included.
///
/// When a name appears more than once, the most-derived declaration wins even if it is not
/// a holder. Order follows the resolver's property order.
pub fn model_properties(
    resolver: &dyn Resolver,
    spec: &SpecReference,
    names: &TypeNameResolver<'_>,
    holder_simple_name: &str,
) -> Result<ModeledProperties, ProcessorError> {
    let collection = resolver.collect_properties(&spec.declaration);
    let mut modeled = ModeledProperties {
        properties: Vec::new(),
        origins: collection.origins,
    };
    let mut seen = HashSet::new();
    for property in &collection.properties {
        if !seen.insert(property.name.as_str()) {
            continue;
        }
        if let Some(model) = model_property(
            resolver,
            property,
            names,
            holder_simple_name,
            &mut modeled.origins,
        )? {
            modeled.properties.push(model);
        }
    }
    Ok(modeled)
}

fn model_property(
    resolver: &dyn Resolver,
    property: &Property,
    names: &TypeNameResolver<'_>,
    holder_simple_name: &str,
    origins: &mut BTreeSet<SourceFile>,
) -> Result<Option<PropertyModel>, ProcessorError> {
    let declared = expand_alias(resolver, &property.declared_type, origins);
    if declared.simple_name() != holder_simple_name {
        return Ok(None);
    }
    // A star has no concrete type to construct the backing field with.
    let [argument] = declared.arguments.as_slice() else {
        return Ok(None);
    };
    if argument.type_ref.is_none() {
        return Ok(None);
    }
    let value_type = names.resolve_argument(argument, &property.name)?;
    Ok(Some(PropertyModel {
        name: property.name.clone(),
        value_type,
    }))
}
