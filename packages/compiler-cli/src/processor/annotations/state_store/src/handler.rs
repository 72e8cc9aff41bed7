// StateStore Handler
//
// Detects, analyzes and compiles `@StateStore` targets. Each stage either hands its result
// to the next or fails the target with a coded error.

use statestore_compiler::util::simple_name_of;
use tracing::debug;

use super::extractor::{check_target, extract_spec_argument};
use super::generator::StateStoreSourceGenerator;
use super::properties::model_properties;
use super::request::{GenerationRequest, GenerationRequestBuilder};
use super::validator::validate_spec;
use crate::config::ProcessorOptions;
use crate::processor::diagnostics::ProcessorError;
use crate::processor::reflection::{
    Declaration, Resolver, TypeNameResolver, TypeParameterResolver,
};
use crate::processor::transform::{
    AnalysisOutput, AnnotationHandler, DetectResult, GeneratedArtifact, TargetState,
};

pub struct StateStoreHandler {
    options: ProcessorOptions,
    generator: StateStoreSourceGenerator,
}

impl StateStoreHandler {
    pub fn new(options: ProcessorOptions) -> anyhow::Result<Self> {
        let generator = StateStoreSourceGenerator::new(
            options.holder_class()?,
            options.mutable_holder_class()?,
            options.suppress_warnings.clone(),
        );
        Ok(StateStoreHandler { options, generator })
    }
}

impl AnnotationHandler for StateStoreHandler {
    type Analysis = GenerationRequest;

    fn name(&self) -> &str {
        "StateStoreHandler"
    }

    fn marker(&self) -> &str {
        &self.options.marker
    }

    fn detect(&self, declaration: Declaration) -> Result<DetectResult, ProcessorError> {
        check_target(&declaration, &self.options.marker)?;
        Ok(DetectResult {
            trigger: simple_name_of(&self.options.marker).to_string(),
            target: declaration,
        })
    }

    fn analyze(
        &self,
        resolver: &dyn Resolver,
        detected: &DetectResult,
    ) -> Result<AnalysisOutput<GenerationRequest>, ProcessorError> {
        let target = &detected.target;
        let options = &self.options;

        let spec_type =
            extract_spec_argument(resolver, target, &options.marker, &options.spec_argument)?;
        debug!(declaration = %target.qualified_name, spec = spec_type.name(), state = %TargetState::ArgumentExtracted);

        let spec = validate_spec(resolver, target, &spec_type)?;
        debug!(declaration = %target.qualified_name, state = %TargetState::SpecValidated);

        let parameters = TypeParameterResolver::for_declaration(resolver, target)?;
        let names = TypeNameResolver::new(resolver, &parameters, &target.qualified_name);
        let modeled = model_properties(resolver, &spec, &names, options.holder_simple_name())?;
        let properties = modeled.properties;
        debug!(
            declaration = %target.qualified_name,
            properties = properties.len(),
            state = %TargetState::PropertiesModeled
        );

        let mut warnings = Vec::new();
        if properties.is_empty() {
            warnings.push(ProcessorError::NoRecognizedProperties {
                target: target.qualified_name.clone(),
                spec: spec.qualified_name.clone(),
                holder: options.holder_simple_name().to_string(),
            });
        }

        let request = GenerationRequestBuilder::new(target.qualified_name.clone())
            .derived_class_name(&options.class_prefix, &target.package, &target.simple_name)
            .super_interface(spec.class_name.clone())
            .type_variables(parameters.type_variables())
            .properties(properties)
            .aggregating(options.aggregating)
            .origin(target.containing_file.as_ref())
            .origin(spec.declaration.containing_file.as_ref())
            .origins(&spec.origins)
            .origins(&modeled.origins)
            .build()?;
        debug!(declaration = %target.qualified_name, state = %TargetState::RequestBuilt);

        Ok(AnalysisOutput {
            analysis: request,
            warnings,
        })
    }

    fn compile(&self, request: &GenerationRequest) -> Result<GeneratedArtifact, ProcessorError> {
        self.generator.generate(request)
    }
}
