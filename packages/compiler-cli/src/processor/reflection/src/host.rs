use serde::{Deserialize, Serialize};
use statestore_compiler::util::simple_name_of;
use std::collections::{BTreeSet, HashSet};

use super::type_names::{expand_alias, substitute_type_parameters};

/// A source file a declaration was read from. Generated outputs depend on these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceFile(String);

impl SourceFile {
    pub fn new(path: impl Into<String>) -> Self {
        SourceFile(path.into())
    }

    pub fn path(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Interface,
    Class,
    EnumClass,
    EnumEntry,
    Object,
    AnnotationClass,
}

impl ClassKind {
    /// Article-prefixed description used in diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            ClassKind::Interface => "an interface",
            ClassKind::Class => "a class",
            ClassKind::EnumClass => "an enum class",
            ClassKind::EnumEntry => "an enum entry",
            ClassKind::Object => "an object",
            ClassKind::AnnotationClass => "an annotation class",
        }
    }
}

/// What a declaration is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Class(ClassKind),
    /// `typealias Name<..> = target`
    TypeAlias { target: TypeReference },
    Function,
    Property,
    File,
}

impl DeclarationKind {
    pub fn describe(&self) -> &'static str {
        match self {
            DeclarationKind::Class(kind) => kind.describe(),
            DeclarationKind::TypeAlias { .. } => "a type alias",
            DeclarationKind::Function => "a function",
            DeclarationKind::Property => "a property",
            DeclarationKind::File => "a file",
        }
    }
}

/// Use-site or declaration-site variance as the front end reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
    Star,
}

/// What a type reference points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTarget {
    /// A class-like declaration or type alias, by qualified name.
    Declaration(String),
    /// A type parameter of the enclosing declaration, by name.
    Parameter(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    #[serde(flatten)]
    pub target: TypeTarget,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<TypeArgument>,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeReference {
    pub fn declaration(qualified_name: impl Into<String>) -> Self {
        TypeReference {
            target: TypeTarget::Declaration(qualified_name.into()),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        TypeReference {
            target: TypeTarget::Parameter(name.into()),
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<TypeArgument>) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Name as written: the qualified name or the parameter name.
    pub fn name(&self) -> &str {
        match &self.target {
            TypeTarget::Declaration(name) | TypeTarget::Parameter(name) => name,
        }
    }

    /// Last segment of the referenced name.
    pub fn simple_name(&self) -> &str {
        simple_name_of(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeArgument {
    #[serde(default)]
    pub variance: Variance,
    /// `None` for a star projection.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_ref: Option<TypeReference>,
}

impl TypeArgument {
    pub fn invariant(type_ref: TypeReference) -> Self {
        TypeArgument {
            variance: Variance::Invariant,
            type_ref: Some(type_ref),
        }
    }

    pub fn covariant(type_ref: TypeReference) -> Self {
        TypeArgument {
            variance: Variance::Covariant,
            type_ref: Some(type_ref),
        }
    }

    pub fn contravariant(type_ref: TypeReference) -> Self {
        TypeArgument {
            variance: Variance::Contravariant,
            type_ref: Some(type_ref),
        }
    }

    pub fn star() -> Self {
        TypeArgument {
            variance: Variance::Star,
            type_ref: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bounds: Vec<TypeReference>,
    #[serde(default)]
    pub variance: Variance,
}

/// Value passed to an annotation argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentValue {
    /// A class literal, e.g. `SampleSpec::class`.
    Type(TypeReference),
    /// Any other constant, kept as its source text.
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationArgument {
    /// `None` for positional arguments.
    #[serde(default)]
    pub name: Option<String>,
    pub value: ArgumentValue,
}

/// One annotation instance on a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub short_name: String,
    /// `None` when the host could not resolve the annotation type.
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub arguments: Vec<AnnotationArgument>,
}

impl Annotation {
    /// Whether this instance is the annotation `marker` (a qualified name). Falls back to
    /// comparing short names when the annotation type is unresolved.
    pub fn is(&self, marker: &str) -> bool {
        match &self.qualified_name {
            Some(qualified) => qualified == marker,
            None => simple_name_of(marker) == self.short_name,
        }
    }
}

/// A property declared on a class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: TypeReference,
}

/// A program declaration as the host sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub qualified_name: String,
    #[serde(default)]
    pub package: String,
    pub simple_name: String,
    pub kind: DeclarationKind,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    /// Declared supertypes, in declaration order.
    #[serde(default)]
    pub super_types: Vec<TypeReference>,
    /// Directly declared properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub containing_file: Option<SourceFile>,
    #[serde(default)]
    pub is_local: bool,
}

impl Declaration {
    pub fn class_kind(&self) -> Option<ClassKind> {
        match self.kind {
            DeclarationKind::Class(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_interface(&self) -> bool {
        self.class_kind() == Some(ClassKind::Interface)
    }

    pub fn annotations_of<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Annotation> {
        self.annotations.iter().filter(move |a| a.is(marker))
    }
}

/// Symbol lookups against the host's semantic model.
///
/// Only `find_annotated` and `resolve_declaration` must be supplied; the remaining
/// operations are derived from the declarations those return.
pub trait Resolver {
    /// Declarations marked with the annotation `marker`, in a stable order.
    fn find_annotated(&self, marker: &str) -> Vec<Declaration>;

    /// Declaration a type reference points at. `None` for type parameters and for
    /// declarations the host does not know.
    fn resolve_declaration(&self, type_ref: &TypeReference) -> Option<Declaration>;

    /// The class-literal argument `argument` of the first `marker` annotation on `target`.
    /// A lone positional argument is accepted when no argument carries the name.
    fn get_annotation_argument(
        &self,
        target: &Declaration,
        marker: &str,
        argument: &str,
    ) -> Option<TypeReference> {
        let annotation = target.annotations_of(marker).next()?;
        let by_name = annotation
            .arguments
            .iter()
            .find(|a| a.name.as_deref() == Some(argument));
        let chosen = by_name.or_else(|| {
            match annotation.arguments.as_slice() {
                [only] if only.name.is_none() => Some(only),
                _ => None,
            }
        })?;
        match &chosen.value {
            ArgumentValue::Type(type_ref) => Some(type_ref.clone()),
            ArgumentValue::Literal(_) => None,
        }
    }

    /// Every property visible on `declaration`: its own first, then those of each
    /// supertype depth-first in declaration order. Names may repeat when a property is
    /// overridden; the most-derived declaration comes first.
    fn get_all_properties(&self, declaration: &Declaration) -> Vec<Property> {
        self.collect_properties(declaration).properties
    }

    /// [`Resolver::get_all_properties`] plus the files of every declaration visited.
    ///
    /// Supertypes written through a type alias are expanded, and inherited property types
    /// are rewritten with the type arguments the subtype passes to its supertype.
    fn collect_properties(&self, declaration: &Declaration) -> PropertyCollection {
        let mut collection = PropertyCollection::default();
        let mut visited = HashSet::new();
        visit_declaration(self, declaration, &[], &mut visited, &mut collection);
        collection
    }
}

/// Properties visible on a declaration and the source files they were read from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyCollection {
    pub properties: Vec<Property>,
    pub origins: BTreeSet<SourceFile>,
}

fn visit_declaration<R: Resolver + ?Sized>(
    resolver: &R,
    declaration: &Declaration,
    bindings: &[TypeArgument],
    visited: &mut HashSet<String>,
    out: &mut PropertyCollection,
) {
    if !visited.insert(declaration.qualified_name.clone()) {
        return;
    }
    if let Some(file) = &declaration.containing_file {
        out.origins.insert(file.clone());
    }
    let parameters = &declaration.type_parameters;
    out.properties
        .extend(declaration.properties.iter().map(|property| Property {
            name: property.name.clone(),
            declared_type: substitute_type_parameters(
                &property.declared_type,
                parameters,
                bindings,
            ),
        }));
    for super_type in &declaration.super_types {
        let bound = substitute_type_parameters(super_type, parameters, bindings);
        let expanded = expand_alias(resolver, &bound, &mut out.origins);
        if let Some(parent) = resolver.resolve_declaration(&expanded) {
            visit_declaration(resolver, &parent, &expanded.arguments, visited, out);
        }
    }
}
