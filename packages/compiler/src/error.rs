//! Output Errors
//!
//! Failures raised while building or rendering the Kotlin output model.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, OutputError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// A declaration, property or type was given an empty name.
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    /// A name that cannot be written even with backtick escaping.
    #[error("{kind} name `{name}` cannot be used as a Kotlin identifier")]
    IllegalName { kind: &'static str, name: String },

    /// Two members of the same type share a name.
    #[error("type `{type_name}` declares property `{name}` more than once")]
    DuplicateProperty { type_name: String, name: String },
}
