// Source Generator
//
// Renders a generation request as a Kotlin file:
//
//   @Suppress("MemberVisibilityCanBePrivate", "PropertyName")
//   public abstract class AbsSample : SampleSpec {
//     public override val value: LiveData<Int>
//       get() = _value
//
//     protected var _value: MutableLiveData<Int> = MutableLiveData<Int>()
//   }

use statestore_compiler::{
    AnnotationSpec, ClassName, CodeBlock, FileSpec, KotlinEmitter, Modifiers, OutputError,
    PropertySpec, TypeName, TypeSpec,
};

use super::properties::PropertyModel;
use super::request::GenerationRequest;
use crate::processor::diagnostics::ProcessorError;
use crate::processor::transform::GeneratedArtifact;

pub const DOCUMENTATION: &str = "Auto generated class from StateStore";

pub struct StateStoreSourceGenerator {
    holder: ClassName,
    mutable_holder: ClassName,
    suppress_warnings: Vec<String>,
    emitter: KotlinEmitter,
}

impl StateStoreSourceGenerator {
    pub fn new(holder: ClassName, mutable_holder: ClassName, suppress_warnings: Vec<String>) -> Self {
        StateStoreSourceGenerator {
            holder,
            mutable_holder,
            suppress_warnings,
            emitter: KotlinEmitter::new(),
        }
    }

    pub fn generate(&self, request: &GenerationRequest) -> Result<GeneratedArtifact, ProcessorError> {
        let emit_failure = |error: OutputError| ProcessorError::EmitFailure {
            target: request.target.clone(),
            artifact: request.class_name.canonical_name(),
            reason: error.to_string(),
        };
        let file = self.to_file_spec(request).map_err(emit_failure)?;
        let body = self.emitter.emit_file(&file).map_err(emit_failure)?;
        Ok(GeneratedArtifact {
            target: request.target.clone(),
            package: file.package,
            name: file.name,
            body,
            dependencies: request.dependencies.clone(),
        })
    }

    pub fn to_file_spec(&self, request: &GenerationRequest) -> Result<FileSpec, OutputError> {
        let mut builder = TypeSpec::class_builder(request.class_name.simple_name())
            .add_kdoc(DOCUMENTATION)
            .add_modifiers(Modifiers::PUBLIC | Modifiers::ABSTRACT)
            .add_type_variables(request.type_variables.clone())
            .add_superinterface(TypeName::class(request.super_interface.clone()));

        if !self.suppress_warnings.is_empty() {
            let suppress = self
                .suppress_warnings
                .iter()
                .fold(AnnotationSpec::new(ClassName::new("kotlin", "Suppress")), |a, name| {
                    a.add_member(CodeBlock::builder().string(name.clone()))
                });
            builder = builder.add_annotation(suppress);
        }

        for property in &request.properties {
            let (accessor, backing) = self.properties_for(property);
            builder = builder.add_property(accessor).add_property(backing);
        }

        Ok(FileSpec::get(request.class_name.package.clone(), builder.build()?))
    }

    /// The public read-only holder and its protected mutable backing field.
    fn properties_for(&self, property: &PropertyModel) -> (PropertySpec, PropertySpec) {
        let backing_name = format!("_{}", property.name);
        let holder = self
            .holder
            .clone()
            .parameterized_by(vec![property.value_type.clone()]);
        let mutable_holder = self
            .mutable_holder
            .clone()
            .parameterized_by(vec![property.value_type.clone()]);

        let accessor = PropertySpec::builder(property.name.clone(), holder)
            .add_modifiers(Modifiers::PUBLIC | Modifiers::OVERRIDE)
            .getter(CodeBlock::builder().name(backing_name.clone()));
        let backing = PropertySpec::builder(backing_name, mutable_holder.clone())
            .add_modifiers(Modifiers::PROTECTED)
            .mutable()
            .initializer(CodeBlock::construct(mutable_holder));
        (accessor, backing)
    }
}
