//! FLIX document parsing.
//!
//! Two document layouts are in circulation. Both are read into the same
//! [`TemplateDescriptor`], with parameters ordered by their declared index.

mod v1_0;
mod v1_1;

use crate::error::{Result, TypesError};
use crate::operation::OperationKind;
use crate::semantic_type::SemanticType;
use crate::template::{ContractDependency, Parameter, TemplateDescriptor, DEFAULT_TITLE};
use serde::Deserialize;

/// Language tag messages are read in.
pub const PREFERRED_LANGUAGE: &str = "en-US";

/// Supported `f_version` values.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0.0", "1.1.0"];

#[derive(Deserialize)]
struct VersionCheck {
    #[serde(default)]
    f_version: String,
}

/// Read the `f_version` of a template document.
pub fn template_version(json: &str) -> Result<String> {
    let check: VersionCheck = serde_json::from_str(json)?;
    if check.f_version.is_empty() {
        return Err(TypesError::MissingVersion);
    }
    Ok(check.f_version)
}

/// Parse a template document of any supported version.
pub fn parse_template(json: &str) -> Result<TemplateDescriptor> {
    let version = template_version(json)?;
    let descriptor = match version.as_str() {
        "1.0.0" => serde_json::from_str::<v1_0::InteractionTemplate>(json)?.into_descriptor()?,
        "1.1.0" => serde_json::from_str::<v1_1::InteractionTemplate>(json)?.into_descriptor()?,
        _ => return Err(TypesError::UnsupportedVersion(version)),
    };

    tracing::debug!(
        "Parsed template '{}' (v{}, {}, {} parameters)",
        descriptor.title,
        descriptor.version,
        descriptor.kind,
        descriptor.parameters.len()
    );

    Ok(descriptor)
}

/// Parameter as read from a document, before ordering.
pub(crate) struct RawParameter {
    pub name: String,
    pub index: usize,
    pub ty: String,
    pub description: String,
}

/// Version-independent view of a document.
pub(crate) struct RawTemplate {
    pub id: String,
    pub computed_id: Option<String>,
    pub version: String,
    pub kind: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cadence: String,
    pub parameters: Vec<RawParameter>,
    pub dependencies: Vec<ContractDependency>,
    pub output: Option<String>,
}

impl RawTemplate {
    pub(crate) fn build(self) -> Result<TemplateDescriptor> {
        let kind: OperationKind = self.kind.parse()?;

        let mut raw = self.parameters;
        raw.sort_by_key(|p| p.index);

        let parameters = raw
            .into_iter()
            .map(|p| {
                Ok(Parameter {
                    ty: SemanticType::parse(&p.ty)?,
                    name: p.name,
                    description: p.description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let output = match (kind, self.output) {
            (OperationKind::Query, Some(ty)) if !ty.is_empty() => Some(SemanticType::parse(&ty)?),
            _ => None,
        };

        let descriptor = TemplateDescriptor {
            id: self.id,
            computed_id: self.computed_id,
            version: self.version,
            kind,
            title: self
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            description: self.description.unwrap_or_default(),
            cadence: self.cadence,
            parameters,
            dependencies: self.dependencies,
            output,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }
}
