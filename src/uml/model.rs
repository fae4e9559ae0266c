//! Target model for the UML pipeline.
//!
//! Relationship adjacency is stored as id sets rather than object
//! references: a component's `realizes`/`uses` entries and an interface's
//! `realized_by` entries name elements owned by the [`UmlModel`] itself.
//! Sets keep insertion order, so linking is deterministic.

use indexmap::IndexSet;
use std::sync::Arc;

use crate::base::ElementId;

/// An operation owned by an interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UmlOperation {
    pub id: ElementId,
    pub name: Arc<str>,
}

impl UmlOperation {
    pub fn new(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An interface with its owned operations and the components realizing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UmlInterface {
    pub id: ElementId,
    pub name: Arc<str>,
    pub operations: Vec<UmlOperation>,
    /// Components realizing this interface (back-references, populated by
    /// the linker).
    pub realized_by: IndexSet<ElementId>,
}

impl UmlInterface {
    pub fn new(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            operations: Vec::new(),
            realized_by: IndexSet::new(),
        }
    }
}

/// A component with its realization and usage adjacency.
///
/// Both sets are populated by the linker, never by the entity parser.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UmlComponent {
    pub id: ElementId,
    pub name: Arc<str>,
    /// Interfaces this component realizes.
    pub realizes: IndexSet<ElementId>,
    /// Interfaces this component depends on.
    pub uses: IndexSet<ElementId>,
}

impl UmlComponent {
    pub fn new(id: impl Into<ElementId>, name: impl Into<Arc<str>>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            realizes: IndexSet::new(),
            uses: IndexSet::new(),
        }
    }
}

/// The fully linked UML model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UmlModel {
    pub components: Vec<UmlComponent>,
    pub interfaces: Vec<UmlInterface>,
}

impl UmlModel {
    pub fn new(components: Vec<UmlComponent>, interfaces: Vec<UmlInterface>) -> Self {
        Self {
            components,
            interfaces,
        }
    }

    /// Look up a component by id.
    pub fn component(&self, id: &ElementId) -> Option<&UmlComponent> {
        self.components.iter().find(|c| &c.id == id)
    }

    /// Look up an interface by id.
    pub fn interface(&self, id: &ElementId) -> Option<&UmlInterface> {
        self.interfaces.iter().find(|i| &i.id == id)
    }

    /// Look up a component by name.
    pub fn component_named(&self, name: &str) -> Option<&UmlComponent> {
        self.components.iter().find(|c| c.name.as_ref() == name)
    }

    /// Look up an interface by name.
    pub fn interface_named(&self, name: &str) -> Option<&UmlInterface> {
        self.interfaces.iter().find(|i| i.name.as_ref() == name)
    }
}
