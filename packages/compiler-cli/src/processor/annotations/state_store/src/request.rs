// Generation Request
//
// Everything the source generator needs for one target, assembled through a builder that
// refuses to hand out a request with required fields missing.

use statestore_compiler::{ClassName, TypeVariableName};

use super::properties::PropertyModel;
use crate::processor::diagnostics::ProcessorError;
use crate::processor::incremental::Dependencies;
use crate::processor::reflection::SourceFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Qualified name of the annotated declaration.
    pub target: String,
    /// Generated class, in the target's package.
    pub class_name: ClassName,
    /// Spec interface the generated class implements.
    pub super_interface: ClassName,
    pub type_variables: Vec<TypeVariableName>,
    pub properties: Vec<PropertyModel>,
    pub dependencies: Dependencies,
}

impl GenerationRequest {
    pub fn builder(target: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(target)
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationRequestBuilder {
    target: String,
    class_name: Option<ClassName>,
    super_interface: Option<ClassName>,
    type_variables: Vec<TypeVariableName>,
    properties: Vec<PropertyModel>,
    dependencies: Dependencies,
}

impl GenerationRequestBuilder {
    pub fn new(target: impl Into<String>) -> Self {
        GenerationRequestBuilder {
            target: target.into(),
            ..Default::default()
        }
    }

    pub fn class_name(mut self, class_name: ClassName) -> Self {
        self.class_name = Some(class_name);
        self
    }

    /// `<prefix><simple_name>` in `package`. An empty simple name leaves the class name unset.
    pub fn derived_class_name(self, prefix: &str, package: &str, simple_name: &str) -> Self {
        if simple_name.is_empty() {
            return self;
        }
        self.class_name(ClassName::new(package, format!("{}{}", prefix, simple_name)))
    }

    pub fn super_interface(mut self, super_interface: ClassName) -> Self {
        self.super_interface = Some(super_interface);
        self
    }

    pub fn type_variables(mut self, type_variables: Vec<TypeVariableName>) -> Self {
        self.type_variables = type_variables;
        self
    }

    pub fn properties(mut self, properties: Vec<PropertyModel>) -> Self {
        self.properties = properties;
        self
    }

    pub fn aggregating(mut self, aggregating: bool) -> Self {
        self.dependencies.aggregating = aggregating;
        self
    }

    pub fn origin(mut self, file: Option<&SourceFile>) -> Self {
        self.dependencies.add(file);
        self
    }

    pub fn origins<'f>(mut self, files: impl IntoIterator<Item = &'f SourceFile>) -> Self {
        for file in files {
            self.dependencies.add(Some(file));
        }
        self
    }

    pub fn is_valid(&self) -> bool {
        self.class_name.is_some() && self.super_interface.is_some()
    }

    pub fn build(self) -> Result<GenerationRequest, ProcessorError> {
        let missing = |missing| ProcessorError::IncompleteGenerationRequest {
            target: self.target.clone(),
            missing,
        };
        let class_name = self.class_name.clone().ok_or_else(|| missing("class name"))?;
        let super_interface = self
            .super_interface
            .clone()
            .ok_or_else(|| missing("super interface"))?;
        Ok(GenerationRequest {
            target: self.target,
            class_name,
            super_interface,
            type_variables: self.type_variables,
            properties: self.properties,
            dependencies: self.dependencies,
        })
    }
}
