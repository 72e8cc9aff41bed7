use super::error::{Diagnostic, DiagnosticCategory};

/// Receives warnings and errors. Reporting never interrupts processing of other targets.
pub trait DiagnosticSink {
    fn warn(&mut self, diagnostic: Diagnostic);

    fn error(&mut self, diagnostic: Diagnostic);

    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.category {
            DiagnosticCategory::Warning => self.warn(diagnostic),
            DiagnosticCategory::Error => self.error(diagnostic),
        }
    }
}

/// Keeps every diagnostic in report order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingDiagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, "warning reported");
        self.diagnostics.push(diagnostic);
    }

    fn error(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(code = %diagnostic.code, "error reported");
        self.diagnostics.push(diagnostic);
    }
}
