#![deny(clippy::all)]

/**
 * StateStore Compiler - Kotlin output model
 *
 * Type names, declarations and the emitter used to render generated sources
 */
pub mod error;
pub mod output;
pub mod util;

// Re-exports
pub use error::{OutputError, Result};
pub use output::kotlin_emitter::KotlinEmitter;
pub use output::output_ast::{
    AnnotationSpec, ClassName, CodeBlock, FileSpec, Modifiers, PropertySpec, TypeName, TypeSpec,
    TypeVariableName, Variance,
};

/// Compiler version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
