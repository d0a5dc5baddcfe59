//! Mirror Type Definitions
//!
//! This crate contains the core data model for the reflection generator.
//! It provides pure data structures for describing a type's member
//! declarations, the per-field descriptors computed from them, and the
//! abstract accessor table consumed by every emitter, without any parsing
//! or code generation logic.

pub mod decl;
pub mod descriptor;
pub mod table;

// Re-export commonly used types at the crate root
pub use decl::*;
pub use descriptor::*;
pub use table::*;
