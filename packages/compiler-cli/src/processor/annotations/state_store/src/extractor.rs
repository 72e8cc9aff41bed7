// Argument Extractor
//
// Gates which declarations are processed and pulls the spec class literal out of the
// marker annotation.

use statestore_compiler::util::simple_name_of;

use crate::processor::diagnostics::ProcessorError;
use crate::processor::reflection::{Declaration, DeclarationKind, Resolver, TypeReference};

/// Only named, class-like declarations can receive a generated base class.
pub fn check_target(declaration: &Declaration, marker: &str) -> Result<(), ProcessorError> {
    if !matches!(declaration.kind, DeclarationKind::Class(_)) {
        return Err(ProcessorError::TargetNotAClass {
            target: declaration.qualified_name.clone(),
            marker: simple_name_of(marker).to_string(),
            kind: declaration.kind.describe().to_string(),
        });
    }
    if declaration.is_local {
        return Err(ProcessorError::LocalDeclarationNotSupported {
            target: declaration.qualified_name.clone(),
        });
    }
    Ok(())
}

/// The spec type named by `argument` on the first `marker` annotation of `target`.
pub fn extract_spec_argument(
    resolver: &dyn Resolver,
    target: &Declaration,
    marker: &str,
    argument: &str,
) -> Result<TypeReference, ProcessorError> {
    resolver
        .get_annotation_argument(target, marker, argument)
        .ok_or_else(|| ProcessorError::MissingSpecArgument {
            target: target.qualified_name.clone(),
            marker: simple_name_of(marker).to_string(),
            argument: argument.to_string(),
        })
}
