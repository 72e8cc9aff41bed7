use serde::{Deserialize, Serialize};

/// Stable codes for every diagnostic the processor reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ErrorCode {
    /// The marker annotation carries no spec argument.
    MissingSpecArgument = 1001,

    /// The spec argument references something other than an interface.
    SpecMustBeInterface = 1002,

    /// The spec interface has no property of the recognized holder type.
    NoRecognizedProperties = 1003,

    /// A generation request was built without one of its required fields.
    IncompleteGenerationRequest = 1004,

    /// Rendering or persisting the generated source failed.
    EmitFailure = 1005,

    /// The spec argument could not be resolved to a declaration.
    UnresolvedSpecType = 1006,

    /// A property type references a type parameter the annotated class does not declare.
    UnknownTypeParameter = 1007,

    /// The marker annotation sits on something that is not a class.
    TargetNotAClass = 1008,

    /// Local and anonymous classes have no package path to generate into.
    LocalDeclarationNotSupported = 1009,

    /// A property type cannot be expressed as a class name.
    UnresolvedPropertyType = 1010,
}

impl ErrorCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SS{}", self.as_i32())
    }
}
