use super::*;
use crate::processor::diagnostics::{CollectingDiagnostics, ErrorCode, ProcessorError};
use crate::processor::incremental::{Dependencies, DependencyTracker};
use crate::processor::reflection::{Declaration, Resolver, SourceFile};
use crate::processor::testing::{state_store, FakeResolver};
use crate::config::DEFAULT_MARKER;
use std::collections::BTreeSet;

/// Emits one artifact per target named after it; targets whose name starts with `Bad`
/// fail analysis.
struct EchoHandler;

impl AnnotationHandler for EchoHandler {
    type Analysis = Declaration;

    fn name(&self) -> &str {
        "EchoHandler"
    }

    fn marker(&self) -> &str {
        DEFAULT_MARKER
    }

    fn detect(&self, declaration: Declaration) -> Result<DetectResult, ProcessorError> {
        Ok(DetectResult {
            trigger: "StateStore".to_string(),
            target: declaration,
        })
    }

    fn analyze(
        &self,
        _resolver: &dyn Resolver,
        detected: &DetectResult,
    ) -> Result<AnalysisOutput<Declaration>, ProcessorError> {
        if detected.target.simple_name.starts_with("Bad") {
            return Err(ProcessorError::UnresolvedSpecType {
                target: detected.target.qualified_name.clone(),
                spec: "app.Missing".to_string(),
            });
        }
        Ok(AnalysisOutput {
            analysis: detected.target.clone(),
            warnings: Vec::new(),
        })
    }

    fn compile(&self, analysis: &Declaration) -> Result<GeneratedArtifact, ProcessorError> {
        Ok(GeneratedArtifact {
            target: analysis.qualified_name.clone(),
            package: analysis.package.clone(),
            name: format!("Abs{}", analysis.simple_name),
            body: format!("// {}\n", analysis.simple_name),
            dependencies: Dependencies::new(false).with(analysis.containing_file.as_ref()),
        })
    }
}

fn resolver(names: &[&str]) -> FakeResolver {
    names.iter().fold(FakeResolver::new(), |resolver, name| {
        resolver.with(
            FakeResolver::class(&format!("app.{}", name))
                .annotation(state_store("app.Spec"))
                .file(&format!("app/{}.kt", name))
                .build(),
        )
    })
}

#[test]
fn test_failing_target_does_not_stop_siblings() {
    let resolver = resolver(&["Bad", "Good"]);
    let mut sink = InMemorySink::new();
    let mut diagnostics = CollectingDiagnostics::new();

    let summary = ProcessingPass::new(&EchoHandler, &resolver).run(
        &mut sink,
        &mut diagnostics,
        EmitFilter::All,
    );

    assert_eq!(sink.paths(), &["app/AbsGood.kt".to_string()]);
    assert_eq!(
        summary.state_of("app.Bad"),
        Some(TargetState::Failed(ErrorCode::UnresolvedSpecType))
    );
    assert_eq!(summary.state_of("app.Good"), Some(TargetState::Emitted));
    assert_eq!(diagnostics.errors().count(), 1);
    assert_eq!(
        diagnostics.diagnostics()[0].file.as_deref(),
        Some("app/Bad.kt")
    );
}

#[test]
fn test_sink_rejection_becomes_emit_failure() {
    let resolver = resolver(&["Good"]);
    let mut sink = InMemorySink::new();
    let mut diagnostics = CollectingDiagnostics::new();
    let pass = ProcessingPass::new(&EchoHandler, &resolver);

    pass.run(&mut sink, &mut diagnostics, EmitFilter::All);
    let summary = pass.run(&mut sink, &mut diagnostics, EmitFilter::All);

    assert_eq!(
        summary.state_of("app.Good"),
        Some(TargetState::Failed(ErrorCode::EmitFailure))
    );
    assert_eq!(diagnostics.errors().next().map(|d| d.code), Some(ErrorCode::EmitFailure));
}

#[test]
fn test_stale_filter_skips_up_to_date_artifacts() {
    let resolver = resolver(&["First", "Second"]);
    let mut previous = DependencyTracker::new();
    previous.record(
        "app/AbsFirst.kt",
        &Dependencies::new(false).with(Some(&SourceFile::new("app/First.kt"))),
    );
    previous.record(
        "app/AbsSecond.kt",
        &Dependencies::new(false).with(Some(&SourceFile::new("app/Second.kt"))),
    );
    let changed: BTreeSet<SourceFile> = [SourceFile::new("app/Second.kt")].into_iter().collect();
    let mut sink = InMemorySink::new();
    let mut diagnostics = CollectingDiagnostics::new();

    let summary = ProcessingPass::new(&EchoHandler, &resolver).run(
        &mut sink,
        &mut diagnostics,
        EmitFilter::Stale {
            previous: &previous,
            changed: &changed,
        },
    );

    assert_eq!(summary.state_of("app.First"), Some(TargetState::UpToDate));
    assert_eq!(summary.state_of("app.Second"), Some(TargetState::Emitted));
    assert_eq!(sink.len(), 1);
    assert_eq!(summary.dependencies.artifacts().count(), 2);
}

#[test]
fn test_records_follow_resolver_order() {
    let resolver = resolver(&["Zeta", "Alpha", "Mid"]);
    let mut sink = InMemorySink::new();
    let mut diagnostics = CollectingDiagnostics::new();

    let summary = ProcessingPass::new(&EchoHandler, &resolver).run(
        &mut sink,
        &mut diagnostics,
        EmitFilter::All,
    );

    let targets: Vec<&str> = summary.records.iter().map(|r| r.target.as_str()).collect();
    assert_eq!(targets, vec!["app.Alpha", "app.Mid", "app.Zeta"]);
    assert_eq!(summary.emitted().count(), 3);
    assert_eq!(summary.failed().count(), 0);
}
