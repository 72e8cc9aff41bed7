// Transform API - Core types and traits for annotation handling
//
// The interface between an annotation handler, which knows what one marker means, and the
// processing pass, which drives every handler stage over all annotated targets.

use statestore_compiler::util::source_file_path;

use crate::processor::diagnostics::ProcessorError;
use crate::processor::incremental::Dependencies;
use crate::processor::reflection::{Declaration, Resolver};

/// A declaration the handler accepted for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectResult {
    /// Short name of the annotation that triggered the match.
    pub trigger: String,
    pub target: Declaration,
}

/// Successful analysis of one target plus any non-fatal findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutput<A> {
    pub analysis: A,
    /// Warning-category errors found along the way. They never stop generation.
    pub warnings: Vec<ProcessorError>,
}

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Qualified name of the annotated declaration this was generated for.
    pub target: String,
    pub package: String,
    /// Class and file name, without extension.
    pub name: String,
    pub body: String,
    pub dependencies: Dependencies,
}

impl GeneratedArtifact {
    /// Relative output path, also the artifact's key: `a/b/Name.kt`.
    pub fn path(&self) -> String {
        source_file_path(&self.package, &self.name)
    }
}

/// Handles one marker annotation.
///
/// A handler is stateless across targets; each stage only sees what the previous stage
/// returned for the same target.
pub trait AnnotationHandler {
    type Analysis;

    /// The name of this handler (for logging).
    fn name(&self) -> &str;

    /// Qualified name of the marker annotation this handler processes.
    fn marker(&self) -> &str;

    /// Decide whether `declaration` can be processed at all.
    fn detect(&self, declaration: Declaration) -> Result<DetectResult, ProcessorError>;

    /// Extract everything compilation needs from the target and the declarations it refers to.
    fn analyze(
        &self,
        resolver: &dyn Resolver,
        detected: &DetectResult,
    ) -> Result<AnalysisOutput<Self::Analysis>, ProcessorError>;

    /// Render the analysis into a source file.
    fn compile(&self, analysis: &Self::Analysis) -> Result<GeneratedArtifact, ProcessorError>;
}
