//! Architecture Module - input descriptions and the component graph.
//!
//! # Components
//!
//! - `ArchitectureDescription` - Candidate architecture as supplied by the caller
//! - `ComponentGraph` - Directed dependency graph built once per analysis pass
//! - `GraphError` - Construction failures, attributed to one architecture

mod description;
mod errors;
mod graph;

pub use description::{
    AnalysisInput, ArchitectureBuilder, ArchitectureDescription, ArchitectureInput,
    ArchitectureViews, CommunicationPath, ComponentSpec, ComponentView, ConnectorSpec,
    DeploymentNode, DeploymentView, Interaction, InterfaceSpec, Interfaces,
};
pub use errors::{Endpoint, GraphError, UnreadableArchitecture};
pub use graph::{ComponentEdge, ComponentGraph, ComponentNode};
