// Spec Validator

use std::collections::BTreeSet;

use statestore_compiler::ClassName;

use crate::processor::diagnostics::ProcessorError;
use crate::processor::reflection::{
    expand_alias, Declaration, Resolver, SourceFile, TypeReference,
};

/// A resolved spec interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReference {
    pub qualified_name: String,
    pub class_name: ClassName,
    pub declaration: Declaration,
    /// Alias files passed through on the way to the interface.
    pub origins: BTreeSet<SourceFile>,
}

/// Resolve the spec referenced by `target` and require it to be an interface.
pub fn validate_spec(
    resolver: &dyn Resolver,
    target: &Declaration,
    spec: &TypeReference,
) -> Result<SpecReference, ProcessorError> {
    let unresolved = || ProcessorError::UnresolvedSpecType {
        target: target.qualified_name.clone(),
        spec: spec.name().to_string(),
    };

    let mut origins = BTreeSet::new();
    let declaration = resolver
        .resolve_declaration(&expand_alias(resolver, spec, &mut origins))
        .ok_or_else(unresolved)?;

    if !declaration.is_interface() {
        return Err(ProcessorError::SpecMustBeInterface {
            target: target.qualified_name.clone(),
            spec: declaration.qualified_name.clone(),
            kind: declaration.kind.describe().to_string(),
        });
    }

    let class_name = ClassName::from_qualified(&declaration.package, &declaration.qualified_name)
        .or_else(|_| ClassName::best_guess(&declaration.qualified_name))
        .map_err(|_| unresolved())?;

    Ok(SpecReference {
        qualified_name: declaration.qualified_name.clone(),
        class_name,
        declaration,
        origins,
    })
}
