//! Raw ACM repository: serde types and the type classifier.
//!
//! The ACM document is a flat `id → item` mapping under
//! `codeItemRepository.repository`. This module deserializes it into raw
//! records and partitions them into per-type buckets for the entity
//! builder. `CodePackage` items are not pre-bucketed; they stay in the raw
//! repository and are consulted by kind during package resolution.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ModelError;

/// The declared kind of a raw repository item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    ControlElement,
    ClassUnit,
    InterfaceUnit,
    CodeCompilationUnit,
    CodePackage,
    /// Anything outside the recognized set. Classification never fails on
    /// an unknown tag; the error surfaces only if the item is referenced.
    Other,
}

impl ItemKind {
    /// Parse from the raw `type` tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ControlElement" => Self::ControlElement,
            "ClassUnit" => Self::ClassUnit,
            "InterfaceUnit" => Self::InterfaceUnit,
            "CodeCompilationUnit" => Self::CodeCompilationUnit,
            "CodePackage" => Self::CodePackage,
            _ => Self::Other,
        }
    }
}

/// A raw item record as it appears in the repository mapping.
#[derive(Clone, Debug, Deserialize)]
pub struct RawItem {
    pub id: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub name: String,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(rename = "parentId", default)]
    pub parent_id: Option<String>,
}

impl RawItem {
    pub fn kind(&self) -> ItemKind {
        ItemKind::from_tag(&self.type_tag)
    }
}

#[derive(Debug, Deserialize)]
struct AcmDocument {
    #[serde(rename = "codeItemRepository")]
    code_item_repository: CodeItemRepository,
}

#[derive(Debug, Deserialize)]
struct CodeItemRepository {
    repository: IndexMap<String, RawItem>,
}

/// The flat id-indexed repository of an ACM document.
///
/// Insertion order of the underlying map follows document order, which
/// keeps every downstream ordering deterministic.
#[derive(Debug)]
pub struct Repository {
    items: IndexMap<String, RawItem>,
}

impl Repository {
    /// Deserialize a repository from the raw JSON document.
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let document: AcmDocument = serde_json::from_str(content)
            .map_err(|e| ModelError::malformed(format!("ACM JSON: {e}")))?;
        let items = document.code_item_repository.repository;
        tracing::debug!(item_count = items.len(), "loaded ACM repository");
        Ok(Self { items })
    }

    /// Look up an item by id, failing with a dangling-reference error.
    pub fn get(&self, id: &str, context: &'static str) -> Result<&RawItem, ModelError> {
        self.items
            .get(id)
            .ok_or_else(|| ModelError::dangling(context, id))
    }

    /// Iterate over all items in document order.
    pub fn items(&self) -> impl Iterator<Item = &RawItem> {
        self.items.values()
    }
}

/// Raw items partitioned by declared kind.
///
/// A kind with zero instances yields an empty bucket, not an error.
#[derive(Debug, Default)]
pub struct Classified<'a> {
    pub control_elements: Vec<&'a RawItem>,
    pub classes: Vec<&'a RawItem>,
    pub interfaces: Vec<&'a RawItem>,
    pub compilation_units: Vec<&'a RawItem>,
}

impl<'a> Classified<'a> {
    /// Partition the repository in a single pass.
    pub fn partition(repository: &'a Repository) -> Self {
        let mut buckets = Self::default();
        for item in repository.items() {
            match item.kind() {
                ItemKind::ControlElement => buckets.control_elements.push(item),
                ItemKind::ClassUnit => buckets.classes.push(item),
                ItemKind::InterfaceUnit => buckets.interfaces.push(item),
                ItemKind::CodeCompilationUnit => buckets.compilation_units.push(item),
                // Packages are resolved against the raw repository.
                ItemKind::CodePackage | ItemKind::Other => {}
            }
        }
        tracing::debug!(
            control_elements = buckets.control_elements.len(),
            classes = buckets.classes.len(),
            interfaces = buckets.interfaces.len(),
            compilation_units = buckets.compilation_units.len(),
            "classified ACM repository"
        );
        buckets
    }
}
