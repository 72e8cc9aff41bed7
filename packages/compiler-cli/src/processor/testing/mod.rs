//! Testing
//!
//! In-memory collaborators for exercising the pipeline without a host.

pub mod src {
    pub mod fake_resolver;
}

pub use src::fake_resolver::*;
