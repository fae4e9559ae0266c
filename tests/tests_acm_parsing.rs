//! ACM Pipeline Tests
//!
//! End-to-end coverage for `parse_code_from_acm`: repository
//! classification, entity building, root discovery, and forest assembly.

use archmodel::acm::TypeUnit;
use archmodel::error::ModelError;
use archmodel::parse_code_from_acm;

/// Helper to collect root package names in model order.
fn root_names(json: &str) -> Vec<String> {
    parse_code_from_acm(json)
        .unwrap()
        .root_packages
        .iter()
        .map(|p| p.name.to_string())
        .collect()
}

// ============================================================================
// Minimal document
// ============================================================================

const MINIMAL: &str = r#"{
    "codeItemRepository": {
        "repository": {
            "P1": { "id": "P1", "type": "CodePackage", "name": "pkg",
                    "content": ["U1"], "parentId": null },
            "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo",
                    "extension": "java", "content": ["C1"], "parentId": "P1" },
            "C1": { "id": "C1", "type": "ClassUnit", "name": "Foo", "content": [] }
        }
    }
}"#;

#[test]
fn test_minimal_document() {
    let model = parse_code_from_acm(MINIMAL).unwrap();
    assert_eq!(model.root_packages.len(), 1);

    let root = &model.root_packages[0];
    assert_eq!(root.name.as_ref(), "pkg");
    assert!(root.child_packages.is_empty());
    assert_eq!(root.compilation_units.len(), 1);

    let unit = &root.compilation_units[0];
    assert_eq!(unit.file_name.as_ref(), "Foo.java");
    assert_eq!(unit.content.len(), 1);
    match &unit.content[0] {
        TypeUnit::Class(class) => {
            assert_eq!(class.name.as_ref(), "Foo");
            assert!(class.content.is_empty());
        }
        other => panic!("expected a class unit, got {other:?}"),
    }
}

// ============================================================================
// Nested hierarchies and completeness
// ============================================================================

const NESTED: &str = r#"{
    "codeItemRepository": {
        "repository": {
            "root": { "id": "root", "type": "CodePackage", "name": "com",
                      "content": ["mid"], "parentId": null },
            "mid": { "id": "mid", "type": "CodePackage", "name": "impl",
                     "content": ["leaf", "U1"], "parentId": "root" },
            "leaf": { "id": "leaf", "type": "CodePackage", "name": "util",
                      "content": ["U2"], "parentId": "mid" },
            "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "App",
                    "extension": "java", "content": ["C1"], "parentId": "mid" },
            "U2": { "id": "U2", "type": "CodeCompilationUnit", "name": "Strings",
                    "extension": "java", "content": ["I1", "C2"], "parentId": "leaf" },
            "C1": { "id": "C1", "type": "ClassUnit", "name": "App", "content": ["E1", "E2"] },
            "C2": { "id": "C2", "type": "ClassUnit", "name": "StringsImpl", "content": [] },
            "I1": { "id": "I1", "type": "InterfaceUnit", "name": "Strings", "content": ["E3"] },
            "E1": { "id": "E1", "type": "ControlElement", "name": "main" },
            "E2": { "id": "E2", "type": "ControlElement", "name": "config" },
            "E3": { "id": "E3", "type": "ControlElement", "name": "join" }
        }
    }
}"#;

#[test]
fn test_nested_package_tree() {
    let model = parse_code_from_acm(NESTED).unwrap();
    assert_eq!(model.root_packages.len(), 1);

    let root = &model.root_packages[0];
    assert_eq!(root.name.as_ref(), "com");
    assert_eq!(root.child_packages.len(), 1);

    let mid = &root.child_packages[0];
    assert_eq!(mid.name.as_ref(), "impl");
    assert_eq!(mid.child_packages.len(), 1);
    assert_eq!(mid.compilation_units.len(), 1);
    assert_eq!(mid.compilation_units[0].file_name.as_ref(), "App.java");

    let leaf = &mid.child_packages[0];
    assert_eq!(leaf.name.as_ref(), "util");
    assert_eq!(leaf.compilation_units.len(), 1);

    // Content order inside a compilation unit follows the source record.
    let strings = &leaf.compilation_units[0];
    let names: Vec<_> = strings.content.iter().map(|t| t.name()).collect();
    assert_eq!(names, ["Strings", "StringsImpl"]);
}

#[test]
fn test_every_compilation_unit_appears_exactly_once() {
    let model = parse_code_from_acm(NESTED).unwrap();
    let mut ids: Vec<_> = model
        .compilation_units()
        .map(|u| u.id.as_str().to_string())
        .collect();
    ids.sort();
    assert_eq!(ids, ["U1", "U2"]);
}

#[test]
fn test_interface_unit_content_resolves() {
    let model = parse_code_from_acm(NESTED).unwrap();
    let strings = model
        .compilation_units()
        .find(|u| u.file_name.as_ref() == "Strings.java")
        .unwrap();
    match &strings.content[0] {
        TypeUnit::Interface(interface) => {
            assert_eq!(interface.content.len(), 1);
            assert_eq!(interface.content[0].name.as_ref(), "join");
        }
        other => panic!("expected an interface unit, got {other:?}"),
    }
}

// ============================================================================
// Multiple roots and ordering
// ============================================================================

#[test]
fn test_root_order_follows_first_discovery() {
    let json = r#"{
        "codeItemRepository": {
            "repository": {
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "A",
                        "extension": "java", "content": [], "parentId": "PB" },
                "U2": { "id": "U2", "type": "CodeCompilationUnit", "name": "B",
                        "extension": "java", "content": [], "parentId": "PA" },
                "PA": { "id": "PA", "type": "CodePackage", "name": "alpha",
                        "content": ["U2"], "parentId": null },
                "PB": { "id": "PB", "type": "CodePackage", "name": "beta",
                        "content": ["U1"], "parentId": null }
            }
        }
    }"#;
    // U1 is seen first and its parent chain ends at beta.
    assert_eq!(root_names(json), ["beta", "alpha"]);
}

// ============================================================================
// Failure modes
// ============================================================================

#[test]
fn test_dangling_class_content_fails_fast() {
    let json = r#"{
        "codeItemRepository": {
            "repository": {
                "C1": { "id": "C1", "type": "ClassUnit", "name": "Foo", "content": ["ghost"] }
            }
        }
    }"#;
    let err = parse_code_from_acm(json).unwrap_err();
    match err {
        ModelError::DanglingReference { id, .. } => assert_eq!(id, "ghost"),
        other => panic!("expected dangling reference, got {other}"),
    }
}

#[test]
fn test_package_content_of_unexpected_type_fails() {
    let json = r#"{
        "codeItemRepository": {
            "repository": {
                "P1": { "id": "P1", "type": "CodePackage", "name": "pkg",
                        "content": ["E1", "U1"], "parentId": null },
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo",
                        "extension": "java", "content": [], "parentId": "P1" },
                "E1": { "id": "E1", "type": "ControlElement", "name": "stray" }
            }
        }
    }"#;
    let err = parse_code_from_acm(json).unwrap_err();
    assert!(matches!(err, ModelError::Structural { .. }), "got: {err}");
}

#[test]
fn test_package_with_two_parents_violates_forest() {
    let json = r#"{
        "codeItemRepository": {
            "repository": {
                "A": { "id": "A", "type": "CodePackage", "name": "a",
                       "content": ["shared"], "parentId": null },
                "B": { "id": "B", "type": "CodePackage", "name": "b",
                       "content": ["shared", "U2"], "parentId": null },
                "shared": { "id": "shared", "type": "CodePackage", "name": "shared",
                            "content": ["U1"], "parentId": "A" },
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "X",
                        "extension": "java", "content": [], "parentId": "shared" },
                "U2": { "id": "U2", "type": "CodeCompilationUnit", "name": "Y",
                        "extension": "java", "content": [], "parentId": "B" }
            }
        }
    }"#;
    let err = parse_code_from_acm(json).unwrap_err();
    assert!(matches!(err, ModelError::Structural { .. }), "got: {err}");
}

#[test]
fn test_broken_parent_chain_fails() {
    let json = r#"{
        "codeItemRepository": {
            "repository": {
                "U1": { "id": "U1", "type": "CodeCompilationUnit", "name": "Foo",
                        "extension": "java", "content": [], "parentId": "ghost" }
            }
        }
    }"#;
    let err = parse_code_from_acm(json).unwrap_err();
    assert!(matches!(err, ModelError::DanglingReference { .. }), "got: {err}");
}

#[test]
fn test_malformed_json_fails() {
    let err = parse_code_from_acm("not json at all").unwrap_err();
    assert!(matches!(err, ModelError::Malformed(_)));
}

#[test]
fn test_empty_repository_yields_empty_model() {
    let json = r#"{ "codeItemRepository": { "repository": {} } }"#;
    let model = parse_code_from_acm(json).unwrap();
    assert!(model.root_packages.is_empty());
}
