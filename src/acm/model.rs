//! Target model for the ACM pipeline.
//!
//! All entities are built once, synchronously, during a single parse call
//! and are never mutated afterward. Ownership is strictly tree-shaped:
//! no shared ownership, no cycles.

use crate::base::ElementId;
use std::sync::Arc;

/// A leaf code construct (e.g. a method or field) attached to a class or
/// interface unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlElement {
    pub id: ElementId,
    pub name: Arc<str>,
}

impl ControlElement {
    pub fn new(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A class declaration owning its control elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassUnit {
    pub id: ElementId,
    pub name: Arc<str>,
    pub content: Vec<ControlElement>,
}

impl ClassUnit {
    pub fn new(
        id: impl Into<ElementId>,
        name: impl Into<Arc<str>>,
        content: Vec<ControlElement>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content,
        }
    }
}

/// An interface declaration. Same shape as [`ClassUnit`], distinct tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceUnit {
    pub id: ElementId,
    pub name: Arc<str>,
    pub content: Vec<ControlElement>,
}

impl InterfaceUnit {
    pub fn new(
        id: impl Into<ElementId>,
        name: impl Into<Arc<str>>,
        content: Vec<ControlElement>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            content,
        }
    }
}

/// Content of a compilation unit: either a class or an interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeUnit {
    Class(ClassUnit),
    Interface(InterfaceUnit),
}

impl TypeUnit {
    pub fn id(&self) -> &ElementId {
        match self {
            Self::Class(c) => &c.id,
            Self::Interface(i) => &i.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Class(c) => &c.name,
            Self::Interface(i) => &i.name,
        }
    }
}

/// A source-file-level container owning class and interface units.
///
/// `file_name` is composed as `name + "." + extension` from the source
/// record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeCompilationUnit {
    pub id: ElementId,
    pub file_name: Arc<str>,
    pub content: Vec<TypeUnit>,
}

impl CodeCompilationUnit {
    pub fn new(
        id: impl Into<ElementId>,
        file_name: impl Into<Arc<str>>,
        content: Vec<TypeUnit>,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            content,
        }
    }
}

/// A package tree node grouping child packages and compilation units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcmPackage {
    pub id: ElementId,
    pub name: Arc<str>,
    pub child_packages: Vec<AcmPackage>,
    pub compilation_units: Vec<CodeCompilationUnit>,
}

impl AcmPackage {
    pub fn new(
        id: impl Into<ElementId>,
        name: impl Into<Arc<str>>,
        child_packages: Vec<AcmPackage>,
        compilation_units: Vec<CodeCompilationUnit>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            child_packages,
            compilation_units,
        }
    }
}

/// Top-level container: the rooted package forest of an ACM document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeModel {
    pub root_packages: Vec<AcmPackage>,
}

impl CodeModel {
    pub fn new(root_packages: Vec<AcmPackage>) -> Self {
        Self { root_packages }
    }

    /// Iterate over all packages in the forest, parents before children.
    ///
    /// Uses an explicit work list so arbitrarily deep hierarchies cannot
    /// exhaust the call stack.
    pub fn packages(&self) -> impl Iterator<Item = &AcmPackage> {
        let mut stack: Vec<&AcmPackage> = self.root_packages.iter().rev().collect();
        std::iter::from_fn(move || {
            let pack = stack.pop()?;
            stack.extend(pack.child_packages.iter().rev());
            Some(pack)
        })
    }

    /// Iterate over every compilation unit in the forest.
    pub fn compilation_units(&self) -> impl Iterator<Item = &CodeCompilationUnit> {
        self.packages().flat_map(|p| p.compilation_units.iter())
    }

    /// Total number of packages in the forest.
    pub fn package_count(&self) -> usize {
        self.packages().count()
    }
}
