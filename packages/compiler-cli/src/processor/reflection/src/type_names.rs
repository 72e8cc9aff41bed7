// Type Names
//
// Converts resolver type references into output type names. Type aliases are expanded,
// type parameters are looked up in the table built from the annotated target.

use indexmap::IndexMap;
use std::collections::BTreeSet;

use statestore_compiler::{ClassName, TypeName, TypeVariableName, Variance as OutputVariance};

use super::host::{
    Declaration, DeclarationKind, Resolver, SourceFile, TypeArgument, TypeParameter,
    TypeReference, TypeTarget, Variance,
};
use crate::processor::diagnostics::ProcessorError;

/// Alias chains longer than this are treated as cyclic and left unexpanded.
const MAX_ALIAS_DEPTH: usize = 32;

/// Expand `type_ref` through type aliases until it names something that is not an alias.
/// Nullability accumulates across the chain.
pub fn resolve_alias<R: Resolver + ?Sized>(resolver: &R, type_ref: &TypeReference) -> TypeReference {
    expand_alias(resolver, type_ref, &mut BTreeSet::new())
}

/// Like [`resolve_alias`], also recording the file of every alias passed through.
pub fn expand_alias<R: Resolver + ?Sized>(
    resolver: &R,
    type_ref: &TypeReference,
    origins: &mut BTreeSet<SourceFile>,
) -> TypeReference {
    let mut current = type_ref.clone();
    for _ in 0..MAX_ALIAS_DEPTH {
        let Some(declaration) = resolver.resolve_declaration(&current) else {
            return current;
        };
        let DeclarationKind::TypeAlias { target } = &declaration.kind else {
            return current;
        };
        if let Some(file) = &declaration.containing_file {
            origins.insert(file.clone());
        }
        let expanded =
            substitute_type_parameters(target, &declaration.type_parameters, &current.arguments);
        let nullable = current.nullable || expanded.nullable;
        current = TypeReference {
            nullable,
            ..expanded
        };
    }
    current
}

/// Replace `parameters` in `target` with the `arguments` supplied at a use site. Parameters
/// without a matching argument are left as written.
pub fn substitute_type_parameters(
    target: &TypeReference,
    parameters: &[TypeParameter],
    arguments: &[TypeArgument],
) -> TypeReference {
    if let TypeTarget::Parameter(name) = &target.target {
        let replacement = parameters
            .iter()
            .position(|p| &p.name == name)
            .and_then(|index| arguments.get(index))
            .and_then(|argument| argument.type_ref.as_ref());
        if let Some(replacement) = replacement {
            let mut replaced = replacement.clone();
            replaced.nullable |= target.nullable;
            return replaced;
        }
        return target.clone();
    }

    let arguments = target
        .arguments
        .iter()
        .map(|argument| substitute_argument(argument, parameters, arguments))
        .collect();
    TypeReference {
        target: target.target.clone(),
        arguments,
        nullable: target.nullable,
    }
}

fn substitute_argument(
    argument: &TypeArgument,
    parameters: &[TypeParameter],
    use_site: &[TypeArgument],
) -> TypeArgument {
    let Some(type_ref) = &argument.type_ref else {
        return argument.clone();
    };
    if let TypeTarget::Parameter(name) = &type_ref.target {
        let supplied = parameters
            .iter()
            .position(|p| &p.name == name)
            .and_then(|index| use_site.get(index));
        if let Some(supplied) = supplied {
            // A use-site projection wins over an invariant slot in the alias body.
            let variance = match argument.variance {
                Variance::Invariant => supplied.variance,
                declared => declared,
            };
            let type_ref = supplied.type_ref.as_ref().map(|r| {
                let mut r = r.clone();
                r.nullable |= type_ref.nullable;
                r
            });
            return TypeArgument { variance, type_ref };
        }
    }
    TypeArgument {
        variance: argument.variance,
        type_ref: Some(substitute_type_parameters(type_ref, parameters, use_site)),
    }
}

/// The type parameters of an annotated target, resolved to output type variables.
///
/// Every parameter name is registered before any bound is converted so bounds may refer
/// to other parameters (`T : Comparable<T>`).
#[derive(Debug, Clone, Default)]
pub struct TypeParameterResolver {
    parameters: IndexMap<String, TypeVariableName>,
}

impl TypeParameterResolver {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn for_declaration(
        resolver: &dyn Resolver,
        declaration: &Declaration,
    ) -> Result<Self, ProcessorError> {
        let mut table = TypeParameterResolver::empty();
        for parameter in &declaration.type_parameters {
            table.parameters.insert(
                parameter.name.clone(),
                TypeVariableName::new(parameter.name.clone())
                    .with_variance(declaration_variance(parameter.variance)),
            );
        }

        let mut resolved = Vec::with_capacity(declaration.type_parameters.len());
        {
            let names = TypeNameResolver::new(resolver, &table, &declaration.qualified_name);
            for parameter in &declaration.type_parameters {
                let mut bounds = Vec::new();
                for bound in &parameter.bounds {
                    if is_implicit_bound(bound) {
                        continue;
                    }
                    bounds.push(names.resolve(bound, &parameter.name)?);
                }
                resolved.push((parameter.name.clone(), bounds));
            }
        }
        for (name, bounds) in resolved {
            if let Some(variable) = table.parameters.get_mut(&name) {
                variable.bounds = bounds;
            }
        }
        Ok(table)
    }

    pub fn get(&self, name: &str) -> Option<&TypeVariableName> {
        self.parameters.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Declared order.
    pub fn type_variables(&self) -> Vec<TypeVariableName> {
        self.parameters.values().cloned().collect()
    }
}

/// `kotlin.Any?` is the bound every parameter has without writing one.
fn is_implicit_bound(bound: &TypeReference) -> bool {
    bound.nullable && bound.arguments.is_empty() && bound.name() == "kotlin.Any"
}

fn declaration_variance(variance: Variance) -> Option<OutputVariance> {
    match variance {
        Variance::Covariant => Some(OutputVariance::Out),
        Variance::Contravariant => Some(OutputVariance::In),
        Variance::Invariant | Variance::Star => None,
    }
}

/// Converts references found on one annotated target.
pub struct TypeNameResolver<'a> {
    resolver: &'a dyn Resolver,
    parameters: &'a TypeParameterResolver,
    target: &'a str,
}

impl<'a> TypeNameResolver<'a> {
    pub fn new(
        resolver: &'a dyn Resolver,
        parameters: &'a TypeParameterResolver,
        target: &'a str,
    ) -> Self {
        TypeNameResolver {
            resolver,
            parameters,
            target,
        }
    }

    /// Convert `type_ref`, which appears on the member `site` (a property or parameter name,
    /// used in diagnostics).
    pub fn resolve(&self, type_ref: &TypeReference, site: &str) -> Result<TypeName, ProcessorError> {
        let expanded = resolve_alias(self.resolver, type_ref);
        let type_name = match &expanded.target {
            TypeTarget::Parameter(name) => self
                .parameters
                .get(name)
                .map(TypeVariableName::to_type_name)
                .ok_or_else(|| ProcessorError::UnknownTypeParameter {
                    target: self.target.to_string(),
                    name: name.clone(),
                })?,
            TypeTarget::Declaration(qualified_name) => {
                let class_name = self.class_name(&expanded, qualified_name, site)?;
                let arguments = expanded
                    .arguments
                    .iter()
                    .map(|argument| self.resolve_argument(argument, site))
                    .collect::<Result<Vec<_>, _>>()?;
                class_name.parameterized_by(arguments)
            }
        };
        Ok(type_name.copy(expanded.nullable))
    }

    pub fn resolve_argument(
        &self,
        argument: &TypeArgument,
        site: &str,
    ) -> Result<TypeName, ProcessorError> {
        let Some(type_ref) = &argument.type_ref else {
            return Ok(TypeName::Star);
        };
        let bound = self.resolve(type_ref, site)?;
        Ok(match argument.variance {
            Variance::Invariant => bound,
            Variance::Covariant => TypeName::producer_of(bound),
            Variance::Contravariant => TypeName::consumer_of(bound),
            Variance::Star => TypeName::Star,
        })
    }

    fn class_name(
        &self,
        type_ref: &TypeReference,
        qualified_name: &str,
        site: &str,
    ) -> Result<ClassName, ProcessorError> {
        let declared = self
            .resolver
            .resolve_declaration(type_ref)
            .and_then(|d| ClassName::from_qualified(&d.package, &d.qualified_name).ok());
        declared
            .or_else(|| ClassName::best_guess(qualified_name).ok())
            .ok_or_else(|| ProcessorError::UnresolvedPropertyType {
                target: self.target.to_string(),
                property: site.to_string(),
                type_name: qualified_name.to_string(),
            })
    }
}
