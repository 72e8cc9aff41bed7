#![deny(clippy::all)]

/**
 * StateStore Compiler CLI - Rust Implementation
 *
 * Annotation processing pipeline, reference host and the `ssc` entry point
 */
// Re-export the output library for convenience
pub use statestore_compiler as compiler;

pub mod config;
pub mod host;
pub mod main_entry;
pub mod perform_compile;
pub mod processor;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
