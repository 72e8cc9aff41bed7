//! Output Module
//!
//! Kotlin output model and its emitter

pub mod kotlin_emitter;
pub mod output_ast;
