//! Relationship linking for the UML pipeline.
//!
//! Resolves realization and usage records against the entity maps and sets
//! the adjacency id sets. Resolution is all-or-nothing: a single
//! unresolved endpoint fails the entire parse; no edge is ever silently
//! dropped.

use indexmap::IndexMap;

use crate::base::ElementId;
use crate::error::ModelError;
use crate::uml::model::{UmlComponent, UmlInterface};
use crate::uml::parser::{InterfaceRealization, Usage};

/// Link all relationship records into the entity maps.
pub(crate) fn link(
    components: &mut IndexMap<String, UmlComponent>,
    interfaces: &mut IndexMap<String, UmlInterface>,
    realizations: &[InterfaceRealization],
    usages: &[Usage],
) -> Result<(), ModelError> {
    for realization in realizations {
        let child = components.get_mut(&realization.child_component_id);
        let parent = interfaces.get_mut(&realization.parent_interface_id);
        match (child, parent) {
            (Some(component), Some(interface)) => {
                component
                    .realizes
                    .insert(ElementId::new(interface.id.as_str()));
                interface
                    .realized_by
                    .insert(ElementId::new(component.id.as_str()));
            }
            _ => {
                return Err(ModelError::UnresolvedEndpoint {
                    context: "interface realization",
                    source_id: realization.child_component_id.clone(),
                    target_id: realization.parent_interface_id.clone(),
                });
            }
        }
    }

    for usage in usages {
        let source = components.get_mut(&usage.source_component_id);
        let target = interfaces.get(&usage.target_interface_id);
        match (source, target) {
            (Some(component), Some(interface)) => {
                component.uses.insert(ElementId::new(interface.id.as_str()));
            }
            _ => {
                return Err(ModelError::UnresolvedEndpoint {
                    context: "usage",
                    source_id: usage.source_component_id.clone(),
                    target_id: usage.target_interface_id.clone(),
                });
            }
        }
    }

    tracing::debug!(
        realizations = realizations.len(),
        usages = usages.len(),
        "linked UML relationships"
    );
    Ok(())
}
