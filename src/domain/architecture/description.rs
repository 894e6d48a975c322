//! Architecture description - the structured input document.
//!
//! Mirrors the nested YAML/JSON shape produced by the architecture authoring
//! step: a component view (components + connectors) and a deployment view.
//! Keys the analysis does not use (risks, rationale, further views) are
//! accepted and ignored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::domain::foundation::{ArchitectureId, ComponentId, ValidationError};

/// Full analysis input: the candidate architectures plus the contextual
/// sections handed verbatim to the external collaborators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    #[serde(default)]
    pub context: Value,
    #[serde(default)]
    pub stakeholders: Vec<Value>,
    #[serde(default)]
    pub functional_requirements: Vec<Value>,
    #[serde(default)]
    pub non_functional_requirements: Value,
    #[serde(default)]
    pub constraints: Value,
    #[serde(default)]
    pub architectures: Vec<ArchitectureInput>,
}

/// One entry of the `architectures` list.
///
/// Entries that do not parse as a description are kept as raw documents.
/// The evaluation pass converts them and rejects the ones that still fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArchitectureInput {
    Described(ArchitectureDescription),
    Document(serde_yaml::Value),
}

impl ArchitectureInput {
    /// The `architecture_id` of the entry, when one can be read.
    pub fn architecture_id(&self) -> Option<&str> {
        match self {
            ArchitectureInput::Described(description) => Some(description.architecture_id.as_str()),
            ArchitectureInput::Document(document) => document
                .get("architecture_id")
                .and_then(serde_yaml::Value::as_str)
                .filter(|id| !id.trim().is_empty()),
        }
    }

    /// Converts the entry into a description.
    pub fn describe(&self) -> Result<ArchitectureDescription, serde_yaml::Error> {
        match self {
            ArchitectureInput::Described(description) => Ok(description.clone()),
            ArchitectureInput::Document(document) => serde_yaml::from_value(document.clone()),
        }
    }
}

impl From<ArchitectureDescription> for ArchitectureInput {
    fn from(description: ArchitectureDescription) -> Self {
        ArchitectureInput::Described(description)
    }
}

/// One candidate architecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureDescription {
    pub architecture_id: ArchitectureId,
    #[serde(default)]
    pub name: String,
    /// Written either as one style or as a list of styles.
    #[serde(default, deserialize_with = "deserialize_styles", skip_serializing_if = "Vec::is_empty")]
    pub style: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uml_standard: Option<String>,
    #[serde(default)]
    pub views: ArchitectureViews,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureViews {
    #[serde(default)]
    pub component_view: ComponentView,
    #[serde(default)]
    pub deployment_view: DeploymentView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComponentView {
    #[serde(default)]
    pub components: Vec<ComponentSpec>,
    #[serde(default)]
    pub connectors: Vec<ConnectorSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentView {
    #[serde(default)]
    pub nodes: Vec<DeploymentNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub communication_paths: Vec<CommunicationPath>,
}

/// A network path between two nodes, derived from a connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationPath {
    pub from_node: String,
    pub to_node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantics: Option<String>,
}

/// A logical component with its responsibilities and interfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSpec {
    pub id: ComponentId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub interfaces: Interfaces,
}

/// Provided and required interface descriptors of a component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interfaces {
    #[serde(default)]
    pub provided: Vec<InterfaceSpec>,
    #[serde(default)]
    pub required: Vec<InterfaceSpec>,
}

/// One interface, written as `{name, protocol}` or as a bare name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawInterface")]
pub struct InterfaceSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

impl InterfaceSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            protocol: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInterface {
    Name(String),
    Spec {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        protocol: Option<String>,
    },
}

impl From<RawInterface> for InterfaceSpec {
    fn from(raw: RawInterface) -> Self {
        match raw {
            RawInterface::Name(name) => InterfaceSpec::named(name),
            RawInterface::Spec { name, protocol } => InterfaceSpec { name, protocol },
        }
    }
}

/// A directed dependency between two components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorSpec {
    pub from: ComponentId,
    pub to: ComponentId,
    #[serde(default)]
    pub interaction: Interaction,
}

/// Interaction metadata carried by a connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantics: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStyle {
    One(String),
    Many(Vec<Option<String>>),
}

fn deserialize_styles<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawStyle>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(RawStyle::One(style)) => vec![style],
        Some(RawStyle::Many(styles)) => styles.into_iter().flatten().collect(),
    })
}

/// A deployment node and the components placed on it.
///
/// Component ids are not required to exist in the component view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentNode {
    pub id: String,
    #[serde(default)]
    pub deployed_components: Vec<ComponentId>,
}

impl DeploymentNode {
    /// Returns true if the component is placed on this node.
    pub fn hosts(&self, component_id: &ComponentId) -> bool {
        self.deployed_components.contains(component_id)
    }
}

impl ArchitectureDescription {
    /// Creates a builder for constructing an architecture description.
    pub fn builder(architecture_id: impl Into<String>) -> ArchitectureBuilder {
        ArchitectureBuilder::new(architecture_id)
    }

    pub fn components(&self) -> &[ComponentSpec] {
        &self.views.component_view.components
    }

    pub fn connectors(&self) -> &[ConnectorSpec] {
        &self.views.component_view.connectors
    }

    pub fn deployment_nodes(&self) -> &[DeploymentNode] {
        &self.views.deployment_view.nodes
    }
}

/// Builder for constructing ArchitectureDescription instances.
#[derive(Debug, Default)]
pub struct ArchitectureBuilder {
    architecture_id: String,
    name: String,
    style: Vec<String>,
    components: Vec<(String, Vec<String>)>,
    connectors: Vec<(String, String, Interaction)>,
    nodes: Vec<(String, Vec<String>)>,
}

impl ArchitectureBuilder {
    /// Creates a new builder.
    pub fn new(architecture_id: impl Into<String>) -> Self {
        Self {
            architecture_id: architecture_id.into(),
            ..Self::default()
        }
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds an architectural style.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style.push(style.into());
        self
    }

    /// Adds a component with its responsibilities.
    pub fn component(mut self, id: impl Into<String>, responsibilities: &[&str]) -> Self {
        self.components.push((
            id.into(),
            responsibilities.iter().map(|r| r.to_string()).collect(),
        ));
        self
    }

    /// Adds a connector with default interaction metadata.
    pub fn connector(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.connector_with(from, to, Interaction::default())
    }

    /// Adds a connector with explicit interaction metadata.
    pub fn connector_with(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        interaction: Interaction,
    ) -> Self {
        self.connectors.push((from.into(), to.into(), interaction));
        self
    }

    /// Adds a deployment node hosting the given components.
    pub fn deployment_node(mut self, id: impl Into<String>, components: &[&str]) -> Self {
        self.nodes.push((
            id.into(),
            components.iter().map(|c| c.to_string()).collect(),
        ));
        self
    }

    /// Builds the description, validating every identifier.
    pub fn build(self) -> Result<ArchitectureDescription, ValidationError> {
        let components = self
            .components
            .into_iter()
            .map(|(id, responsibilities)| {
                Ok(ComponentSpec {
                    id: ComponentId::new(id)?,
                    component_type: None,
                    responsibilities,
                    interfaces: Interfaces::default(),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let connectors = self
            .connectors
            .into_iter()
            .map(|(from, to, interaction)| {
                Ok(ConnectorSpec {
                    from: ComponentId::new(from)?,
                    to: ComponentId::new(to)?,
                    interaction,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        let nodes = self
            .nodes
            .into_iter()
            .map(|(id, deployed)| {
                Ok(DeploymentNode {
                    id,
                    deployed_components: deployed
                        .into_iter()
                        .map(ComponentId::new)
                        .collect::<Result<Vec<_>, _>>()?,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(ArchitectureDescription {
            architecture_id: ArchitectureId::new(self.architecture_id)?,
            name: self.name,
            style: self.style,
            uml_standard: None,
            views: ArchitectureViews {
                component_view: ComponentView {
                    components,
                    connectors,
                },
                deployment_view: DeploymentView {
                    nodes,
                    communication_paths: Vec::new(),
                },
            },
        })
    }
}
