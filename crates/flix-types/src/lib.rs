//! flix-types - interaction template types.
//!
//! This crate provides the data model shared by the flixkit crates:
//! - Template descriptors and their parameters
//! - FLIX document parsing (v1.0.0 and v1.1.0)
//! - Semantic (Cadence) types and the JSON-Cadence codec
//! - Network import resolution

pub mod argument;
pub mod cadence_json;
pub mod error;
pub mod flix;
pub mod naming;
pub mod network;
pub mod operation;
pub mod semantic_type;
pub mod template;

pub use argument::Argument;
pub use error::{Result, TypesError};
pub use flix::{parse_template, template_version};
pub use operation::OperationKind;
pub use semantic_type::SemanticType;
pub use template::{ContractDependency, Parameter, TemplateDescriptor};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        parse_template, Argument, ContractDependency, OperationKind, Parameter,
        SemanticType, TemplateDescriptor, TypesError,
    };
}
