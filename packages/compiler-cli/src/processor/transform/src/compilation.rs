// Compilation - Drives one processing pass
//
// Every annotated declaration the resolver returns is detected and analyzed first. Only
// after analysis of all targets has finished are artifacts compiled and handed to the
// emitter sink. A failing target is reported and dropped; its siblings continue.

use std::collections::BTreeSet;

use tracing::debug;

use super::api::{AnalysisOutput, AnnotationHandler, DetectResult, GeneratedArtifact};
use super::sink::EmitterSink;
use super::target::{TargetRecord, TargetState};
use crate::processor::diagnostics::{DiagnosticSink, ProcessorError};
use crate::processor::incremental::DependencyTracker;
use crate::processor::reflection::{Declaration, Resolver, SourceFile};

/// Which compiled artifacts are written to the sink.
#[derive(Debug, Clone, Copy)]
pub enum EmitFilter<'a> {
    All,
    /// Only artifacts the previous pass's tracker considers stale after `changed`.
    Stale {
        previous: &'a DependencyTracker,
        changed: &'a BTreeSet<SourceFile>,
    },
}

impl EmitFilter<'_> {
    pub fn should_emit(&self, path: &str) -> bool {
        match self {
            EmitFilter::All => true,
            EmitFilter::Stale { previous, changed } => previous.is_stale(path, changed),
        }
    }
}

/// Outcome of a pass.
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    /// One record per annotated declaration, in resolver order.
    pub records: Vec<TargetRecord>,
    /// Origins of every artifact compiled in this pass, written or not.
    pub dependencies: DependencyTracker,
}

impl PassSummary {
    pub fn emitted(&self) -> impl Iterator<Item = &TargetRecord> {
        self.records
            .iter()
            .filter(|r| r.state == TargetState::Emitted)
    }

    pub fn failed(&self) -> impl Iterator<Item = &TargetRecord> {
        self.records.iter().filter(|r| r.state.is_failed())
    }

    pub fn state_of(&self, target: &str) -> Option<TargetState> {
        self.records
            .iter()
            .find(|r| r.target == target)
            .map(|r| r.state)
    }
}

struct Analyzed<A> {
    index: usize,
    file: Option<String>,
    analysis: A,
}

pub struct ProcessingPass<'a, H: AnnotationHandler> {
    handler: &'a H,
    resolver: &'a dyn Resolver,
}

impl<'a, H: AnnotationHandler> ProcessingPass<'a, H> {
    pub fn new(handler: &'a H, resolver: &'a dyn Resolver) -> Self {
        Self { handler, resolver }
    }

    pub fn run(
        &self,
        sink: &mut dyn EmitterSink,
        diagnostics: &mut dyn DiagnosticSink,
        filter: EmitFilter<'_>,
    ) -> PassSummary {
        let mut summary = PassSummary::default();
        let declarations = self.resolver.find_annotated(self.handler.marker());
        debug!(
            handler = self.handler.name(),
            targets = declarations.len(),
            "starting pass"
        );

        let mut analyzed = Vec::new();
        for declaration in declarations {
            let index = summary.records.len();
            let target = declaration.qualified_name.clone();
            let file = declaration
                .containing_file
                .as_ref()
                .map(|f| f.path().to_string());
            debug!(declaration = %target, state = %TargetState::Discovered);
            summary.records.push(TargetRecord {
                target: target.clone(),
                state: TargetState::Discovered,
                artifact: None,
            });

            match self.analyze(declaration) {
                Ok(output) => {
                    for warning in output.warnings {
                        diagnostics.report(warning.to_diagnostic().with_file(file.clone()));
                    }
                    summary.records[index].state = TargetState::RequestBuilt;
                    analyzed.push(Analyzed {
                        index,
                        file,
                        analysis: output.analysis,
                    });
                }
                Err(error) => {
                    Self::fail(&mut summary.records[index], error, file, diagnostics);
                }
            }
        }

        for Analyzed {
            index,
            file,
            analysis,
        } in analyzed
        {
            let record = &mut summary.records[index];
            let artifact = match self.handler.compile(&analysis) {
                Ok(artifact) => artifact,
                Err(error) => {
                    Self::fail(record, error, file, diagnostics);
                    continue;
                }
            };
            let path = artifact.path();
            record.artifact = Some(path.clone());
            summary.dependencies.record(&path, &artifact.dependencies);

            if !filter.should_emit(&path) {
                record.state = TargetState::UpToDate;
                debug!(declaration = %record.target, state = %record.state);
                continue;
            }
            match Self::emit(sink, &artifact) {
                Ok(()) => {
                    record.state = TargetState::Emitted;
                    debug!(declaration = %record.target, artifact = %path, state = %record.state);
                }
                Err(error) => Self::fail(record, error, file, diagnostics),
            }
        }

        summary
    }

    fn analyze(
        &self,
        declaration: Declaration,
    ) -> Result<AnalysisOutput<H::Analysis>, ProcessorError> {
        let detected: DetectResult = self.handler.detect(declaration)?;
        self.handler.analyze(self.resolver, &detected)
    }

    fn emit(sink: &mut dyn EmitterSink, artifact: &GeneratedArtifact) -> Result<(), ProcessorError> {
        sink.write(artifact)
            .map_err(|error| ProcessorError::EmitFailure {
                target: artifact.target.clone(),
                artifact: artifact.path(),
                reason: error.to_string(),
            })
    }

    fn fail(
        record: &mut TargetRecord,
        error: ProcessorError,
        file: Option<String>,
        diagnostics: &mut dyn DiagnosticSink,
    ) {
        record.state = TargetState::Failed(error.code());
        debug!(declaration = %record.target, state = %record.state);
        diagnostics.report(error.to_diagnostic().with_file(file));
    }
}
