//! StateStore processor
//!
//! Finds `@StateStore` targets through a [`reflection::Resolver`], models their spec
//! interfaces and generates `Abs<Target>` base classes.

pub mod annotations;
pub mod diagnostics;
pub mod incremental;
pub mod reflection;
pub mod testing;
pub mod transform;
