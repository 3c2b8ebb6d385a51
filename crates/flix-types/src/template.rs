//! Template descriptor: the single source of truth for one remote operation.

use crate::error::{Result, TypesError};
use crate::operation::OperationKind;
use crate::semantic_type::SemanticType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Title used when a template carries none.
pub const DEFAULT_TITLE: &str = "Request";

/// One declared parameter of a template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Name callers use to supply the value.
    pub name: String,
    /// Declared semantic type.
    #[serde(rename = "type")]
    pub ty: SemanticType,
    /// Human readable title of the parameter (may be empty).
    #[serde(default)]
    pub description: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            ty,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Addresses of one imported contract, keyed by network name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDependency {
    /// Contract name as imported by the Cadence body.
    pub contract: String,
    /// Placeholder address used in v1.0.0 import statements, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Network name to contract address.
    pub networks: BTreeMap<String, String>,
}

/// Immutable description of one remote operation.
///
/// Parameter order here is authoritative: argument lists are always built
/// from it, never from the order callers supply names in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DescriptorFields")]
pub struct TemplateDescriptor {
    /// Template id as published.
    #[serde(default)]
    pub id: String,
    /// Id recomputed from the document content (v1.1.0 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_id: Option<String>,
    /// Template format version (`f_version`).
    pub version: String,
    /// Mutation or query.
    pub kind: OperationKind,
    /// Title, `"Request"` when absent.
    pub title: String,
    /// Description, empty when absent.
    #[serde(default)]
    pub description: String,
    /// Cadence body with unresolved imports.
    pub cadence: String,
    /// Declared parameters in positional order.
    pub parameters: Vec<Parameter>,
    /// Contract dependencies of the Cadence body.
    #[serde(default)]
    pub dependencies: Vec<ContractDependency>,
    /// Declared result type for queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<SemanticType>,
}

impl TemplateDescriptor {
    /// Create a descriptor with the given kind and parameters.
    ///
    /// Fails if two parameters share a name.
    pub fn new(kind: OperationKind, parameters: Vec<Parameter>) -> Result<Self> {
        let descriptor = Self {
            id: String::new(),
            computed_id: None,
            version: String::new(),
            kind,
            title: DEFAULT_TITLE.to_string(),
            description: String::new(),
            cadence: String::new(),
            parameters,
            dependencies: Vec::new(),
            output: None,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_cadence(mut self, cadence: impl Into<String>) -> Self {
        self.cadence = cadence.into();
        self
    }

    pub fn with_dependency(mut self, dependency: ContractDependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Structural checks: parameter names are unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.parameters.len());
        for param in &self.parameters {
            if !seen.insert(param.name.as_str()) {
                return Err(TypesError::DuplicateParameter(param.name.clone()));
            }
        }
        Ok(())
    }

    /// Whether the published id matches the content.
    ///
    /// `None` when no id could be computed for this document version.
    pub fn id_matches(&self) -> Option<bool> {
        self.computed_id.as_ref().map(|computed| *computed == self.id)
    }

    pub fn is_mutation(&self) -> bool {
        self.kind.is_mutation()
    }

    pub fn is_query(&self) -> bool {
        self.kind.is_query()
    }

    /// Look up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Declared parameter names in positional order.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Dependency entry for a contract.
    pub fn dependency(&self, contract: &str) -> Option<&ContractDependency> {
        self.dependencies.iter().find(|d| d.contract == contract)
    }
}

/// Serialized form, validated on the way in.
#[derive(Deserialize)]
struct DescriptorFields {
    #[serde(default)]
    id: String,
    #[serde(default)]
    computed_id: Option<String>,
    version: String,
    kind: OperationKind,
    title: String,
    #[serde(default)]
    description: String,
    cadence: String,
    parameters: Vec<Parameter>,
    #[serde(default)]
    dependencies: Vec<ContractDependency>,
    #[serde(default)]
    output: Option<SemanticType>,
}

impl TryFrom<DescriptorFields> for TemplateDescriptor {
    type Error = TypesError;

    fn try_from(fields: DescriptorFields) -> Result<Self> {
        let descriptor = Self {
            id: fields.id,
            computed_id: fields.computed_id,
            version: fields.version,
            kind: fields.kind,
            title: fields.title,
            description: fields.description,
            cadence: fields.cadence,
            parameters: fields.parameters,
            dependencies: fields.dependencies,
            output: fields.output,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
