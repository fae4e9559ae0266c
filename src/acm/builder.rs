//! Bottom-up entity construction for the ACM pipeline.
//!
//! Entities are built in dependency order: control elements first (no
//! references), then class/interface units, then compilation units. Each
//! content id is taken *by move* out of the map built in the previous
//! step, which enforces tree-shaped ownership: an entity referenced by two
//! owners fails the second take as a dangling reference.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use crate::acm::model::{ClassUnit, CodeCompilationUnit, ControlElement, InterfaceUnit, TypeUnit};
use crate::acm::repository::{Classified, ItemKind, RawItem, Repository};
use crate::error::ModelError;

/// Output of the entity builder, consumed by the package resolver.
#[derive(Debug)]
pub(crate) struct BuiltEntities {
    /// Compilation units by id, to be moved into their packages.
    pub units: FxHashMap<String, CodeCompilationUnit>,
    /// Every non-null `parentId` seen on a compilation unit, in
    /// first-discovery order. Seed for root discovery.
    pub leaf_package_ids: IndexSet<String>,
}

/// Build all ACM entities below the package level.
pub(crate) fn build_entities(
    repository: &Repository,
    buckets: &Classified<'_>,
) -> Result<BuiltEntities, ModelError> {
    let mut control_elements: FxHashMap<String, ControlElement> = buckets
        .control_elements
        .iter()
        .map(|item| {
            (
                item.id.clone(),
                ControlElement::new(item.id.as_str(), item.name.as_str()),
            )
        })
        .collect();

    let mut classes: FxHashMap<String, ClassUnit> = FxHashMap::default();
    for item in &buckets.classes {
        let content = take_control_elements(item, &mut control_elements, "class content")?;
        classes.insert(
            item.id.clone(),
            ClassUnit::new(item.id.as_str(), item.name.as_str(), content),
        );
    }

    let mut interfaces: FxHashMap<String, InterfaceUnit> = FxHashMap::default();
    for item in &buckets.interfaces {
        let content = take_control_elements(item, &mut control_elements, "interface content")?;
        interfaces.insert(
            item.id.clone(),
            InterfaceUnit::new(item.id.as_str(), item.name.as_str(), content),
        );
    }

    let mut units: FxHashMap<String, CodeCompilationUnit> = FxHashMap::default();
    let mut leaf_package_ids: IndexSet<String> = IndexSet::new();
    for item in &buckets.compilation_units {
        let mut content = Vec::with_capacity(item.content.len());
        for content_id in &item.content {
            // The raw item's declared kind decides which map to consult.
            let raw = repository.get(content_id, "compilation unit content")?;
            let type_unit = match raw.kind() {
                ItemKind::ClassUnit => classes
                    .remove(content_id)
                    .map(TypeUnit::Class)
                    .ok_or_else(|| {
                        ModelError::dangling("compilation unit content", content_id.as_str())
                    })?,
                ItemKind::InterfaceUnit => interfaces
                    .remove(content_id)
                    .map(TypeUnit::Interface)
                    .ok_or_else(|| {
                        ModelError::dangling("compilation unit content", content_id.as_str())
                    })?,
                _ => {
                    return Err(ModelError::unexpected_type(
                        "compilation unit content",
                        raw.type_tag.as_str(),
                    ));
                }
            };
            content.push(type_unit);
        }

        let extension = item
            .extension
            .as_deref()
            .ok_or_else(|| ModelError::missing_attribute("compilation unit", "extension"))?;
        let file_name = format!("{}.{}", item.name, extension);
        units.insert(
            item.id.clone(),
            CodeCompilationUnit::new(item.id.as_str(), file_name, content),
        );

        if let Some(parent_id) = &item.parent_id {
            leaf_package_ids.insert(parent_id.clone());
        }
    }

    tracing::debug!(
        units = units.len(),
        leaf_packages = leaf_package_ids.len(),
        "built ACM entities"
    );
    Ok(BuiltEntities {
        units,
        leaf_package_ids,
    })
}

fn take_control_elements(
    item: &RawItem,
    control_elements: &mut FxHashMap<String, ControlElement>,
    context: &'static str,
) -> Result<Vec<ControlElement>, ModelError> {
    item.content
        .iter()
        .map(|id| {
            control_elements
                .remove(id)
                .ok_or_else(|| ModelError::dangling(context, id.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(json: &str) -> Result<BuiltEntities, ModelError> {
        let repository = Repository::from_json(json).unwrap();
        let buckets = Classified::partition(&repository);
        build_entities(&repository, &buckets)
    }

    #[test]
    fn test_file_name_composition() {
        let entities = build(
            r#"{ "codeItemRepository": { "repository": {
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo",
                        "extension": "java", "content": [], "parentId": "P1" }
            } } }"#,
        )
        .unwrap();
        assert_eq!(entities.units["U1"].file_name.as_ref(), "Foo.java");
        assert!(entities.leaf_package_ids.contains("P1"));
    }

    #[test]
    fn test_missing_extension_is_fatal() {
        let err = build(
            r#"{ "codeItemRepository": { "repository": {
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo", "content": [] }
            } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::MissingAttribute { .. }));
    }

    #[test]
    fn test_dangling_class_content_is_fatal() {
        let err = build(
            r#"{ "codeItemRepository": { "repository": {
                "C1": { "id": "C1", "type": "ClassUnit", "name": "Foo", "content": ["ghost"] }
            } } }"#,
        )
        .unwrap_err();
        match err {
            ModelError::DanglingReference { id, .. } => assert_eq!(id, "ghost"),
            other => panic!("expected dangling reference, got {other}"),
        }
    }

    #[test]
    fn test_control_element_shared_by_two_classes_is_fatal() {
        let err = build(
            r#"{ "codeItemRepository": { "repository": {
                "E1": { "id": "E1", "type": "ControlElement", "name": "run" },
                "C1": { "id": "C1", "type": "ClassUnit", "name": "A", "content": ["E1"] },
                "C2": { "id": "C2", "type": "ClassUnit", "name": "B", "content": ["E1"] }
            } } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ModelError::DanglingReference { .. }));
    }

    #[test]
    fn test_compilation_unit_content_of_wrong_kind_is_fatal() {
        let err = build(
            r#"{ "codeItemRepository": { "repository": {
                "E1": { "id": "E1", "type": "ControlElement", "name": "run" },
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo",
                        "extension": "java", "content": ["E1"] }
            } } }"#,
        )
        .unwrap_err();
        match err {
            ModelError::UnexpectedType { found, .. } => assert_eq!(found, "ControlElement"),
            other => panic!("expected unexpected type, got {other}"),
        }
    }

    #[test]
    fn test_leaf_package_ids_keep_first_discovery_order() {
        let entities = build(
            r#"{ "codeItemRepository": { "repository": {
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "A",
                        "extension": "java", "content": [], "parentId": "P2" },
                "U2": { "id": "U2", "type": "CodeCompilationUnit", "name": "B",
                        "extension": "java", "content": [], "parentId": "P1" },
                "U3": { "id": "U3", "type": "CodeCompilationUnit", "name": "C",
                        "extension": "java", "content": [], "parentId": "P2" }
            } } }"#,
        )
        .unwrap();
        let order: Vec<_> = entities.leaf_package_ids.iter().cloned().collect();
        assert_eq!(order, ["P2", "P1"]);
    }
}
