//! Output AST Module
//!
//! Declarations and type names for generated Kotlin sources. Everything here is plain data;
//! rendering lives in `kotlin_emitter`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::{OutputError, Result};

//// Types

/// A fully-qualified class reference, e.g. `androidx.lifecycle.LiveData` or `a.b.Outer.Inner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClassName {
    pub package: String,
    /// Enclosing classes first, the referenced class last. Never empty.
    pub simple_names: Vec<String>,
}

impl ClassName {
    pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
        ClassName {
            package: package.into(),
            simple_names: vec![simple_name.into()],
        }
    }

    pub fn nested(package: impl Into<String>, simple_names: Vec<String>) -> Result<Self> {
        if simple_names.is_empty() || simple_names.iter().any(|n| n.is_empty()) {
            return Err(OutputError::EmptyName { kind: "class" });
        }
        Ok(ClassName {
            package: package.into(),
            simple_names,
        })
    }

    /// Split a qualified name into package and class names. Package segments are the
    /// leading lowercase segments; the first capitalized segment starts the class names.
    pub fn best_guess(qualified_name: &str) -> Result<Self> {
        let segments: Vec<&str> = qualified_name.split('.').collect();
        let first_class = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(|c| c.is_uppercase()))
            .ok_or_else(|| OutputError::IllegalName {
                kind: "class",
                name: qualified_name.to_string(),
            })?;
        Self::nested(
            segments[..first_class].join("."),
            segments[first_class..].iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Split a qualified name using the known package it lives in.
    pub fn from_qualified(package: &str, qualified_name: &str) -> Result<Self> {
        let relative = if package.is_empty() {
            qualified_name
        } else {
            qualified_name
                .strip_prefix(package)
                .and_then(|rest| rest.strip_prefix('.'))
                .ok_or_else(|| OutputError::IllegalName {
                    kind: "class",
                    name: qualified_name.to_string(),
                })?
        };
        Self::nested(package, relative.split('.').map(str::to_string).collect())
    }

    pub fn simple_name(&self) -> &str {
        self.simple_names.last().map(String::as_str).unwrap_or_default()
    }

    /// Outermost class name; this is what gets imported.
    pub fn top_level_name(&self) -> &str {
        self.simple_names.first().map(String::as_str).unwrap_or_default()
    }

    pub fn top_level_class(&self) -> ClassName {
        ClassName::new(self.package.clone(), self.top_level_name())
    }

    pub fn canonical_name(&self) -> String {
        if self.package.is_empty() {
            self.simple_names.join(".")
        } else {
            format!("{}.{}", self.package, self.simple_names.join("."))
        }
    }

    pub fn parameterized_by(self, arguments: Vec<TypeName>) -> TypeName {
        TypeName::Class {
            name: self,
            arguments,
            nullable: false,
        }
    }
}

impl std::fmt::Display for ClassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

/// Declaration-site or use-site variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variance {
    Out,
    In,
}

impl Variance {
    pub fn keyword(&self) -> &'static str {
        match self {
            Variance::Out => "out",
            Variance::In => "in",
        }
    }
}

/// A reference to a type as written in generated code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeName {
    Class {
        name: ClassName,
        arguments: Vec<TypeName>,
        nullable: bool,
    },
    Variable {
        name: String,
        nullable: bool,
    },
    /// Use-site projection: `out T` or `in T`.
    Projection {
        variance: Variance,
        bound: Box<TypeName>,
    },
    /// Star projection `*`.
    Star,
}

impl TypeName {
    pub fn class(name: ClassName) -> Self {
        TypeName::Class {
            name,
            arguments: Vec::new(),
            nullable: false,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeName::Variable {
            name: name.into(),
            nullable: false,
        }
    }

    pub fn producer_of(bound: TypeName) -> Self {
        TypeName::Projection {
            variance: Variance::Out,
            bound: Box::new(bound),
        }
    }

    pub fn consumer_of(bound: TypeName) -> Self {
        TypeName::Projection {
            variance: Variance::In,
            bound: Box::new(bound),
        }
    }

    /// Same type with the given nullability. Projections and stars are left untouched.
    pub fn copy(self, nullable: bool) -> Self {
        match self {
            TypeName::Class {
                name, arguments, ..
            } => TypeName::Class {
                name,
                arguments,
                nullable,
            },
            TypeName::Variable { name, .. } => TypeName::Variable { name, nullable },
            other => other,
        }
    }

    /// Every class referenced by this type, outermost first.
    pub fn referenced_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        match self {
            TypeName::Class {
                name, arguments, ..
            } => {
                out.push(name);
                for argument in arguments {
                    argument.referenced_classes(out);
                }
            }
            TypeName::Projection { bound, .. } => bound.referenced_classes(out),
            TypeName::Variable { .. } | TypeName::Star => {}
        }
    }
}

impl From<ClassName> for TypeName {
    fn from(name: ClassName) -> Self {
        TypeName::class(name)
    }
}

/// A type parameter declared on a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeVariableName {
    pub name: String,
    pub bounds: Vec<TypeName>,
    pub variance: Option<Variance>,
}

impl TypeVariableName {
    pub fn new(name: impl Into<String>) -> Self {
        TypeVariableName {
            name: name.into(),
            bounds: Vec::new(),
            variance: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Vec<TypeName>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_variance(mut self, variance: Option<Variance>) -> Self {
        self.variance = variance;
        self
    }

    /// Reference to this variable from inside the declaring type.
    pub fn to_type_name(&self) -> TypeName {
        TypeName::variable(self.name.clone())
    }
}

bitflags! {
    /// Declaration modifiers, rendered in Kotlin's conventional order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u32 {
        const PUBLIC = 0b0000_0001;
        const PROTECTED = 0b0000_0010;
        const INTERNAL = 0b0000_0100;
        const PRIVATE = 0b0000_1000;
        const ABSTRACT = 0b0001_0000;
        const OPEN = 0b0010_0000;
        const OVERRIDE = 0b0100_0000;
    }
}

impl Modifiers {
    const ORDER: [(Modifiers, &'static str); 7] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::INTERNAL, "internal"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::OPEN, "open"),
        (Modifiers::OVERRIDE, "override"),
    ];

    pub fn keywords(&self) -> Vec<&'static str> {
        Self::ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, keyword)| *keyword)
            .collect()
    }
}

//// Code

/// One piece of a code block. Types and names are resolved by the emitter so that
/// imports and escaping stay consistent across the file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodePart {
    Literal(String),
    Type(TypeName),
    Name(String),
    StringLiteral(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodeBlock {
    pub parts: Vec<CodePart>,
}

impl CodeBlock {
    pub fn builder() -> CodeBlock {
        CodeBlock::default()
    }

    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.parts.push(CodePart::Literal(text.into()));
        self
    }

    pub fn type_name(mut self, type_name: TypeName) -> Self {
        self.parts.push(CodePart::Type(type_name));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.parts.push(CodePart::Name(name.into()));
        self
    }

    pub fn string(mut self, value: impl Into<String>) -> Self {
        self.parts.push(CodePart::StringLiteral(value.into()));
        self
    }

    /// `Type()`: a default constructor call.
    pub fn construct(type_name: TypeName) -> Self {
        CodeBlock::builder().type_name(type_name).literal("()")
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn referenced_classes<'a>(&'a self, out: &mut Vec<&'a ClassName>) {
        for part in &self.parts {
            if let CodePart::Type(type_name) = part {
                type_name.referenced_classes(out);
            }
        }
    }
}

//// Declarations

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    pub class_name: ClassName,
    pub members: Vec<CodeBlock>,
}

impl AnnotationSpec {
    pub fn new(class_name: ClassName) -> Self {
        AnnotationSpec {
            class_name,
            members: Vec::new(),
        }
    }

    pub fn add_member(mut self, member: CodeBlock) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub type_name: TypeName,
    pub modifiers: Modifiers,
    /// `var` when true, `val` otherwise.
    pub mutable: bool,
    pub initializer: Option<CodeBlock>,
    /// Expression returned by a custom getter: `get() = <expr>`.
    pub getter: Option<CodeBlock>,
}

impl PropertySpec {
    pub fn builder(name: impl Into<String>, type_name: TypeName) -> PropertySpec {
        PropertySpec {
            name: name.into(),
            type_name,
            modifiers: Modifiers::empty(),
            mutable: false,
            initializer: None,
            getter: None,
        }
    }

    pub fn add_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn mutable(mut self) -> Self {
        self.mutable = true;
        self
    }

    pub fn initializer(mut self, initializer: CodeBlock) -> Self {
        self.initializer = Some(initializer);
        self
    }

    pub fn getter(mut self, getter: CodeBlock) -> Self {
        self.getter = Some(getter);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    pub name: String,
    pub modifiers: Modifiers,
    pub kdoc: Option<String>,
    pub annotations: Vec<AnnotationSpec>,
    pub type_variables: Vec<TypeVariableName>,
    pub superinterfaces: Vec<TypeName>,
    pub properties: Vec<PropertySpec>,
}

impl TypeSpec {
    pub fn class_builder(name: impl Into<String>) -> TypeSpec {
        TypeSpec {
            name: name.into(),
            modifiers: Modifiers::empty(),
            kdoc: None,
            annotations: Vec::new(),
            type_variables: Vec::new(),
            superinterfaces: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn add_kdoc(mut self, kdoc: impl Into<String>) -> Self {
        self.kdoc = Some(kdoc.into());
        self
    }

    pub fn add_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn add_annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn add_type_variables(mut self, type_variables: Vec<TypeVariableName>) -> Self {
        self.type_variables.extend(type_variables);
        self
    }

    pub fn add_superinterface(mut self, superinterface: TypeName) -> Self {
        self.superinterfaces.push(superinterface);
        self
    }

    pub fn add_property(mut self, property: PropertySpec) -> Self {
        self.properties.push(property);
        self
    }

    /// Checks names are present and properties are unique.
    pub fn build(self) -> Result<TypeSpec> {
        if self.name.is_empty() {
            return Err(OutputError::EmptyName { kind: "type" });
        }
        let mut seen = std::collections::HashSet::new();
        for property in &self.properties {
            if property.name.is_empty() {
                return Err(OutputError::EmptyName { kind: "property" });
            }
            if !seen.insert(property.name.as_str()) {
                return Err(OutputError::DuplicateProperty {
                    type_name: self.name.clone(),
                    name: property.name.clone(),
                });
            }
        }
        Ok(self)
    }

    /// Every class referenced by the declaration, in declaration order.
    pub fn referenced_classes(&self) -> Vec<&ClassName> {
        let mut out = Vec::new();
        for annotation in &self.annotations {
            out.push(&annotation.class_name);
            for member in &annotation.members {
                member.referenced_classes(&mut out);
            }
        }
        for type_variable in &self.type_variables {
            for bound in &type_variable.bounds {
                bound.referenced_classes(&mut out);
            }
        }
        for superinterface in &self.superinterfaces {
            superinterface.referenced_classes(&mut out);
        }
        for property in &self.properties {
            property.type_name.referenced_classes(&mut out);
            if let Some(initializer) = &property.initializer {
                initializer.referenced_classes(&mut out);
            }
            if let Some(getter) = &property.getter {
                getter.referenced_classes(&mut out);
            }
        }
        out
    }
}

/// A single generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    pub package: String,
    pub name: String,
    pub types: Vec<TypeSpec>,
}

impl FileSpec {
    /// File named after the type it contains.
    pub fn get(package: impl Into<String>, type_spec: TypeSpec) -> FileSpec {
        FileSpec {
            package: package.into(),
            name: type_spec.name.clone(),
            types: vec![type_spec],
        }
    }
}
