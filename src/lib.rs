//! # archmodel-base
//!
//! Core library for parsing architecture model documents into typed,
//! immutable object graphs for downstream analysis and visualization.
//!
//! Two input formats are supported, each with its own pipeline:
//!
//! - **ACM** — a JSON code item repository (packages, compilation units,
//!   classes, interfaces, control elements) addressed by opaque ids.
//!   [`parse_code_from_acm`] reconstructs the rooted package forest.
//! - **UML** — a flattened, whitespace-tokenizable quasi-XML fragment
//!   describing components, interfaces, and their realization/usage
//!   relationships. [`parse_uml`] tokenizes, parses, and links it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! acm       → ACM pipeline: classifier → entity builder → package resolver
//! uml       → UML pipeline: lexer → entity parser → linker
//!   ↓
//! error     → ModelError taxonomy (fatal, fail-fast)
//!   ↓
//! base      → Primitives (ElementId)
//! ```
//!
//! Both entry points are pure functions from string to model-or-error:
//! no file system access, no shared state across calls, safe to invoke
//! concurrently from independent contexts.

/// Foundation types: ElementId
pub mod base;

/// Error taxonomy shared by both pipelines
pub mod error;

/// ACM pipeline: JSON repository → CodeModel
pub mod acm;

/// UML pipeline: quasi-XML fragment → UmlModel
pub mod uml;

// Re-export the entry points and top-level models
pub use acm::{CodeModel, parse_code_from_acm};
pub use uml::{UmlModel, UmlParseOptions, parse_uml, parse_uml_with};

// Re-export foundation types
pub use base::ElementId;
pub use error::ModelError;
