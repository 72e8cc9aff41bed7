// Fake Resolver
//
// Resolver over a fixed set of declarations, with builders for writing fixtures tersely.

use std::collections::BTreeMap;

use crate::config::{DEFAULT_HOLDER, DEFAULT_MARKER, DEFAULT_SPEC_ARGUMENT};
use crate::processor::reflection::{
    Annotation, AnnotationArgument, ArgumentValue, ClassKind, Declaration, DeclarationKind,
    Property, Resolver, SourceFile, TypeArgument, TypeParameter, TypeReference, TypeTarget,
};

/// Resolver backed by a map of declarations keyed by qualified name.
#[derive(Debug, Clone, Default)]
pub struct FakeResolver {
    declarations: BTreeMap<String, Declaration>,
}

impl FakeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, declaration: Declaration) -> Self {
        self.add(declaration);
        self
    }

    pub fn add(&mut self, declaration: Declaration) {
        self.declarations
            .insert(declaration.qualified_name.clone(), declaration);
    }

    /// Register `typealias Name<parameters> = target`.
    pub fn with_alias(self, qualified_name: &str, parameters: &[&str], target: TypeReference) -> Self {
        let mut builder = DeclarationBuilder::new(
            qualified_name,
            DeclarationKind::TypeAlias { target },
        );
        for parameter in parameters {
            builder = builder.type_parameter(TypeParameter {
                name: parameter.to_string(),
                bounds: Vec::new(),
                variance: Default::default(),
            });
        }
        self.with(builder.build())
    }

    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.declarations.values()
    }

    pub fn class(qualified_name: &str) -> DeclarationBuilder {
        DeclarationBuilder::new(qualified_name, DeclarationKind::Class(ClassKind::Class))
    }

    pub fn interface(qualified_name: &str) -> DeclarationBuilder {
        DeclarationBuilder::new(qualified_name, DeclarationKind::Class(ClassKind::Interface))
    }

    pub fn declaration(qualified_name: &str, kind: DeclarationKind) -> DeclarationBuilder {
        DeclarationBuilder::new(qualified_name, kind)
    }
}

impl Resolver for FakeResolver {
    fn find_annotated(&self, marker: &str) -> Vec<Declaration> {
        self.declarations
            .values()
            .filter(|d| d.annotations_of(marker).next().is_some())
            .cloned()
            .collect()
    }

    fn resolve_declaration(&self, type_ref: &TypeReference) -> Option<Declaration> {
        match &type_ref.target {
            TypeTarget::Declaration(name) => self.declarations.get(name).cloned(),
            TypeTarget::Parameter(_) => None,
        }
    }
}

/// Builds a [`Declaration`]. The package is taken from the leading lowercase segments of the
/// qualified name unless set explicitly.
#[derive(Debug, Clone)]
pub struct DeclarationBuilder {
    declaration: Declaration,
}

impl DeclarationBuilder {
    pub fn new(qualified_name: &str, kind: DeclarationKind) -> Self {
        let segments: Vec<&str> = qualified_name.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));
        DeclarationBuilder {
            declaration: Declaration {
                qualified_name: qualified_name.to_string(),
                package: segments[..first_class].join("."),
                simple_name: segments.last().copied().unwrap_or_default().to_string(),
                kind,
                type_parameters: Vec::new(),
                annotations: Vec::new(),
                super_types: Vec::new(),
                properties: Vec::new(),
                containing_file: None,
                is_local: false,
            },
        }
    }

    pub fn package(mut self, package: &str) -> Self {
        self.declaration.package = package.to_string();
        self
    }

    pub fn file(mut self, path: &str) -> Self {
        self.declaration.containing_file = Some(SourceFile::new(path));
        self
    }

    pub fn local(mut self) -> Self {
        self.declaration.is_local = true;
        self
    }

    pub fn annotation(mut self, annotation: Annotation) -> Self {
        self.declaration.annotations.push(annotation);
        self
    }

    /// `@StateStore(stateSpec = <spec>::class)` with the default marker.
    pub fn state_store(self, spec: &str) -> Self {
        self.annotation(state_store(spec))
    }

    pub fn type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.declaration.type_parameters.push(parameter);
        self
    }

    pub fn super_type(mut self, super_type: TypeReference) -> Self {
        self.declaration.super_types.push(super_type);
        self
    }

    pub fn property(mut self, name: &str, declared_type: TypeReference) -> Self {
        self.declaration.properties.push(Property {
            name: name.to_string(),
            declared_type,
        });
        self
    }

    pub fn build(self) -> Declaration {
        self.declaration
    }
}

/// `@StateStore(stateSpec = <spec>::class)`.
pub fn state_store(spec: &str) -> Annotation {
    Annotation {
        short_name: "StateStore".to_string(),
        qualified_name: Some(DEFAULT_MARKER.to_string()),
        arguments: vec![AnnotationArgument {
            name: Some(DEFAULT_SPEC_ARGUMENT.to_string()),
            value: ArgumentValue::Type(TypeReference::declaration(spec)),
        }],
    }
}

/// `LiveData<inner>`.
pub fn live_data(inner: TypeReference) -> TypeReference {
    TypeReference::declaration(DEFAULT_HOLDER)
        .with_arguments(vec![TypeArgument::invariant(inner)])
}

/// `kotlin.<name>`.
pub fn kotlin(name: &str) -> TypeReference {
    TypeReference::declaration(format!("kotlin.{}", name))
}
