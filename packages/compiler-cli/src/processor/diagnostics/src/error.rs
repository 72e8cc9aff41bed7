use super::error_code::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
        }
    }
}

/// A user-facing report about one annotated target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: ErrorCode,
    /// Qualified name of the annotated declaration the report is about.
    pub target: Option<String>,
    /// Source file of that declaration, when the host knows it.
    pub file: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }

    pub fn with_file(mut self, file: Option<String>) -> Self {
        self.file = file;
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}: ", file)?;
        }
        write!(f, "{} {}: ", self.category, self.code)?;
        if let Some(target) = &self.target {
            write!(f, "[{}] ", target)?;
        }
        write!(f, "{}", self.message)
    }
}

/// Failure of one stage of the pipeline for one target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessorError {
    #[error("@{marker} on `{target}` has no `{argument}` argument")]
    MissingSpecArgument {
        target: String,
        marker: String,
        argument: String,
    },

    #[error("Store type should be an interface. `{spec}` referenced by `{target}` is {kind}")]
    SpecMustBeInterface {
        target: String,
        spec: String,
        kind: String,
    },

    #[error("A StateSpec interface is required to have {holder} properties. `{spec}` has none")]
    NoRecognizedProperties {
        target: String,
        spec: String,
        holder: String,
    },

    #[error("generation request for `{target}` is missing its {missing}")]
    IncompleteGenerationRequest {
        target: String,
        missing: &'static str,
    },

    #[error("failed to emit `{artifact}`: {reason}")]
    EmitFailure {
        target: String,
        artifact: String,
        reason: String,
    },

    #[error("spec type `{spec}` referenced by `{target}` cannot be resolved")]
    UnresolvedSpecType { target: String, spec: String },

    #[error("No type argument found for `{name}`! Analyzing `{target}`")]
    UnknownTypeParameter { target: String, name: String },

    #[error("@{marker} is only supported on classes; `{target}` is {kind}")]
    TargetNotAClass {
        target: String,
        marker: String,
        kind: String,
    },

    #[error("Local/anonymous classes are not supported! `{target}`")]
    LocalDeclarationNotSupported { target: String },

    #[error("type `{type_name}` of property `{property}` on `{target}` cannot be resolved")]
    UnresolvedPropertyType {
        target: String,
        property: String,
        type_name: String,
    },
}

impl ProcessorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ProcessorError::MissingSpecArgument { .. } => ErrorCode::MissingSpecArgument,
            ProcessorError::SpecMustBeInterface { .. } => ErrorCode::SpecMustBeInterface,
            ProcessorError::NoRecognizedProperties { .. } => ErrorCode::NoRecognizedProperties,
            ProcessorError::IncompleteGenerationRequest { .. } => {
                ErrorCode::IncompleteGenerationRequest
            }
            ProcessorError::EmitFailure { .. } => ErrorCode::EmitFailure,
            ProcessorError::UnresolvedSpecType { .. } => ErrorCode::UnresolvedSpecType,
            ProcessorError::UnknownTypeParameter { .. } => ErrorCode::UnknownTypeParameter,
            ProcessorError::TargetNotAClass { .. } => ErrorCode::TargetNotAClass,
            ProcessorError::LocalDeclarationNotSupported { .. } => {
                ErrorCode::LocalDeclarationNotSupported
            }
            ProcessorError::UnresolvedPropertyType { .. } => ErrorCode::UnresolvedPropertyType,
        }
    }

    pub fn category(&self) -> DiagnosticCategory {
        match self {
            ProcessorError::NoRecognizedProperties { .. }
            | ProcessorError::TargetNotAClass { .. } => DiagnosticCategory::Warning,
            _ => DiagnosticCategory::Error,
        }
    }

    pub fn target(&self) -> &str {
        match self {
            ProcessorError::MissingSpecArgument { target, .. }
            | ProcessorError::SpecMustBeInterface { target, .. }
            | ProcessorError::NoRecognizedProperties { target, .. }
            | ProcessorError::IncompleteGenerationRequest { target, .. }
            | ProcessorError::EmitFailure { target, .. }
            | ProcessorError::UnresolvedSpecType { target, .. }
            | ProcessorError::UnknownTypeParameter { target, .. }
            | ProcessorError::TargetNotAClass { target, .. }
            | ProcessorError::LocalDeclarationNotSupported { target }
            | ProcessorError::UnresolvedPropertyType { target, .. } => target,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            category: self.category(),
            code: self.code(),
            target: Some(self.target().to_string()),
            file: None,
            message: self.to_string(),
        }
    }
}

impl From<ProcessorError> for Diagnostic {
    fn from(error: ProcessorError) -> Self {
        error.to_diagnostic()
    }
}
