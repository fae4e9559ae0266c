//! ACM pipeline: JSON code item repository → [`CodeModel`].
//!
//! The ACM ("architecture code model") document is a flat `id → item`
//! repository. Parsing runs in three stages:
//!
//! ```text
//! Raw JSON
//!     ↓
//! Classifier (repository) → per-type item buckets
//!     ↓
//! Entity builder → ControlElement / ClassUnit / InterfaceUnit / CodeCompilationUnit
//!     ↓
//! Package resolver → root discovery + forest assembly → CodeModel
//! ```
//!
//! Every stage is fail-fast: a dangling reference, unexpected type tag, or
//! malformed document aborts the whole parse.

mod builder;
pub mod model;
pub mod repository;
mod resolver;

pub use model::{
    AcmPackage, ClassUnit, CodeCompilationUnit, CodeModel, ControlElement, InterfaceUnit, TypeUnit,
};
pub use repository::{Classified, ItemKind, RawItem, Repository};

use crate::error::ModelError;

/// Parse an architecture code model from a JSON string.
///
/// Returns the rooted package forest, or the first structural error
/// encountered. No partial model is ever returned.
pub fn parse_code_from_acm(content: &str) -> Result<CodeModel, ModelError> {
    let repository = Repository::from_json(content)?;
    let buckets = Classified::partition(&repository);
    let entities = builder::build_entities(&repository, &buckets)?;
    resolver::resolve_packages(&repository, entities)
}
