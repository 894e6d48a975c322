//! Component Graph - directed dependency graph of one architecture.
//!
//! Nodes are components keyed by id; edges are connectors kept as a
//! multiset, so parallel connectors between the same ordered pair each
//! contribute to degree counts. Self-loops are accepted as-is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::description::{ArchitectureDescription, Interaction, Interfaces};
use super::errors::{Endpoint, GraphError};
use crate::domain::foundation::{ArchitectureId, ComponentId};

/// A graph node: one component with its attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentNode {
    pub id: ComponentId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    pub responsibilities: Vec<String>,
    pub interfaces: Interfaces,
}

/// A graph edge: one connector with its interaction metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentEdge {
    pub from: ComponentId,
    pub to: ComponentId,
    pub interaction: Interaction,
}

/// Read-only directed component graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentGraph {
    architecture_id: ArchitectureId,
    nodes: BTreeMap<ComponentId, ComponentNode>,
    edges: Vec<ComponentEdge>,
}

impl ComponentGraph {
    /// Builds the graph for one architecture description.
    ///
    /// # Errors
    /// - `DuplicateComponent` if two components share an id
    /// - `UnknownComponent` if a connector endpoint is not a declared component
    pub fn build(description: &ArchitectureDescription) -> Result<Self, GraphError> {
        let architecture_id = description.architecture_id.clone();
        let mut nodes = BTreeMap::new();

        for component in description.components() {
            let node = ComponentNode {
                id: component.id.clone(),
                component_type: component.component_type.clone(),
                responsibilities: component.responsibilities.clone(),
                interfaces: component.interfaces.clone(),
            };
            if nodes.insert(component.id.clone(), node).is_some() {
                return Err(GraphError::DuplicateComponent {
                    architecture_id,
                    component_id: component.id.clone(),
                });
            }
        }

        let mut edges = Vec::with_capacity(description.connectors().len());
        for (index, connector) in description.connectors().iter().enumerate() {
            for (endpoint, id) in [(Endpoint::Source, &connector.from), (Endpoint::Target, &connector.to)] {
                if !nodes.contains_key(id) {
                    return Err(GraphError::UnknownComponent {
                        architecture_id,
                        connector_index: index,
                        endpoint,
                        component_id: id.clone(),
                    });
                }
            }
            edges.push(ComponentEdge {
                from: connector.from.clone(),
                to: connector.to.clone(),
                interaction: connector.interaction.clone(),
            });
        }

        Ok(Self {
            architecture_id,
            nodes,
            edges,
        })
    }

    pub fn architecture_id(&self) -> &ArchitectureId {
        &self.architecture_id
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates nodes in component-id order.
    pub fn nodes(&self) -> impl Iterator<Item = &ComponentNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[ComponentEdge] {
        &self.edges
    }

    /// Outgoing edge count for every component (zero for isolated ones).
    pub fn out_degrees(&self) -> BTreeMap<ComponentId, u32> {
        self.degrees(|edge| &edge.from)
    }

    /// Incoming edge count for every component (zero for isolated ones).
    pub fn in_degrees(&self) -> BTreeMap<ComponentId, u32> {
        self.degrees(|edge| &edge.to)
    }

    fn degrees<F>(&self, endpoint: F) -> BTreeMap<ComponentId, u32>
    where
        F: Fn(&ComponentEdge) -> &ComponentId,
    {
        let mut degrees: BTreeMap<ComponentId, u32> =
            self.nodes.keys().map(|id| (id.clone(), 0)).collect();
        for edge in &self.edges {
            if let Some(count) = degrees.get_mut(endpoint(edge)) {
                *count += 1;
            }
        }
        degrees
    }
}
