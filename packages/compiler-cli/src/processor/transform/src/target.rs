// Target State
//
// Progress of one annotated declaration through the pipeline.

use std::fmt;

use crate::processor::diagnostics::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetState {
    Discovered,
    ArgumentExtracted,
    SpecValidated,
    PropertiesModeled,
    RequestBuilt,
    Emitted,
    /// Not regenerated because none of its origins changed.
    UpToDate,
    Failed(ErrorCode),
}

impl TargetState {
    pub fn is_failed(&self) -> bool {
        matches!(self, TargetState::Failed(_))
    }
}

impl fmt::Display for TargetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetState::Discovered => write!(f, "discovered"),
            TargetState::ArgumentExtracted => write!(f, "argument-extracted"),
            TargetState::SpecValidated => write!(f, "spec-validated"),
            TargetState::PropertiesModeled => write!(f, "properties-modeled"),
            TargetState::RequestBuilt => write!(f, "request-built"),
            TargetState::Emitted => write!(f, "emitted"),
            TargetState::UpToDate => write!(f, "up-to-date"),
            TargetState::Failed(code) => write!(f, "failed({})", code),
        }
    }
}

/// Final state of one target after a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRecord {
    pub target: String,
    pub state: TargetState,
    /// Output path, once known.
    pub artifact: Option<String>,
}
