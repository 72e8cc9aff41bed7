//! Reference host
//!
//! A resolver over JSON program models and a sink that writes generated files to disk.

pub mod fs_sink;
pub mod json_program;

pub use fs_sink::*;
pub use json_program::*;
