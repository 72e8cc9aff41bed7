//! Annotation handlers
//!
//! One handler per marker annotation.

pub mod state_store;

pub use state_store::StateStoreHandler;
