//! Package resolution: root discovery and forest assembly.
//!
//! Roots are found by walking `parentId` chains upward from the leaf
//! package ids collected by the entity builder. The forest is then
//! assembled with an explicit work list rather than recursion, so deeply
//! nested package hierarchies cannot exhaust the call stack.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::acm::builder::BuiltEntities;
use crate::acm::model::{AcmPackage, CodeModel};
use crate::acm::repository::{ItemKind, RawItem, Repository};
use crate::error::ModelError;

/// Resolve the package forest and produce the final model.
pub(crate) fn resolve_packages(
    repository: &Repository,
    entities: BuiltEntities,
) -> Result<CodeModel, ModelError> {
    let root_ids = discover_roots(repository, &entities.leaf_package_ids)?;
    tracing::debug!(roots = root_ids.len(), "discovered root packages");
    let root_packages = assemble_forest(repository, entities, &root_ids)?;
    Ok(CodeModel::new(root_packages))
}

/// Walk each leaf package's parent chain to its terminal item.
///
/// Root ids accumulate in first-discovery order, keeping the output model
/// deterministic for a given document.
fn discover_roots(
    repository: &Repository,
    leaf_package_ids: &IndexSet<String>,
) -> Result<IndexSet<String>, ModelError> {
    let mut root_ids: IndexSet<String> = IndexSet::new();
    for leaf_id in leaf_package_ids {
        let mut head = repository.get(leaf_id, "package parent chain")?;
        let mut walked: IndexSet<&str> = IndexSet::new();
        walked.insert(&head.id);
        while let Some(parent_id) = &head.parent_id {
            head = repository.get(parent_id, "package parent chain")?;
            if !walked.insert(&head.id) {
                return Err(ModelError::structural(
                    "package parent chain",
                    format!("cycle through package `{}`", head.id),
                ));
            }
        }
        root_ids.insert(head.id.clone());
    }
    Ok(root_ids)
}

/// Assemble the package forest children-first.
///
/// Phase 1 is an iterative depth-first walk producing a discovery order
/// over package items; a package reached twice violates the forest
/// invariant. Phase 2 processes that order in reverse, so every child
/// package is already built when its parent is assembled.
fn assemble_forest(
    repository: &Repository,
    entities: BuiltEntities,
    root_ids: &IndexSet<String>,
) -> Result<Vec<AcmPackage>, ModelError> {
    let mut order: Vec<&RawItem> = Vec::new();
    let mut seen: IndexSet<&str> = IndexSet::new();
    let mut stack: Vec<&RawItem> = Vec::new();

    for root_id in root_ids {
        let root = repository.get(root_id, "package tree")?;
        if root.kind() != ItemKind::CodePackage {
            return Err(ModelError::unexpected_type(
                "package tree root",
                root.type_tag.as_str(),
            ));
        }
        stack.push(root);
        while let Some(item) = stack.pop() {
            if !seen.insert(&item.id) {
                return Err(ModelError::structural(
                    "package tree",
                    format!("package `{}` is reachable from two parents", item.id),
                ));
            }
            order.push(item);
            for child_id in &item.content {
                let child = repository.get(child_id, "package content")?;
                if child.kind() == ItemKind::CodePackage {
                    stack.push(child);
                }
            }
        }
    }

    let mut units = entities.units;
    let mut built: FxHashMap<String, AcmPackage> = FxHashMap::default();
    for item in order.iter().rev() {
        let mut child_packages = Vec::new();
        let mut compilation_units = Vec::new();
        for child_id in &item.content {
            let child = repository.get(child_id, "package content")?;
            match child.kind() {
                ItemKind::CodePackage => {
                    let pack = built
                        .remove(child_id)
                        .ok_or_else(|| ModelError::dangling("package content", child_id.as_str()))?;
                    child_packages.push(pack);
                }
                ItemKind::CodeCompilationUnit => {
                    let unit = units
                        .remove(child_id)
                        .ok_or_else(|| ModelError::dangling("package content", child_id.as_str()))?;
                    compilation_units.push(unit);
                }
                _ => {
                    return Err(ModelError::structural(
                        "package content",
                        format!(
                            "`{}` is neither package nor compilation unit (found `{}`)",
                            child_id, child.type_tag
                        ),
                    ));
                }
            }
        }
        built.insert(
            item.id.clone(),
            AcmPackage::new(
                item.id.as_str(),
                item.name.as_str(),
                child_packages,
                compilation_units,
            ),
        );
    }

    root_ids
        .iter()
        .map(|root_id| {
            built
                .remove(root_id)
                .ok_or_else(|| ModelError::dangling("package tree", root_id.as_str()))
        })
        .collect()
}
