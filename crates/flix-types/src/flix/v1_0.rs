//! FLIX v1.0.0 document layout.

use super::{RawParameter, RawTemplate, PREFERRED_LANGUAGE};
use crate::error::Result;
use crate::template::{ContractDependency, TemplateDescriptor};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub(crate) struct InteractionTemplate {
    #[serde(default)]
    id: String,
    f_version: String,
    data: Data,
}

#[derive(Debug, Deserialize)]
struct Data {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    messages: Messages,
    #[serde(default)]
    cadence: String,
    /// placeholder address -> contract -> network -> pin
    #[serde(default)]
    dependencies: BTreeMap<String, BTreeMap<String, BTreeMap<String, Network>>>,
    #[serde(default)]
    arguments: BTreeMap<String, Argument>,
}

#[derive(Debug, Default, Deserialize)]
struct Messages {
    title: Option<I18n>,
    description: Option<I18n>,
}

#[derive(Debug, Deserialize)]
struct I18n {
    #[serde(default)]
    i18n: BTreeMap<String, String>,
}

impl I18n {
    fn value(&self) -> Option<&str> {
        self.i18n.get(PREFERRED_LANGUAGE).map(String::as_str)
    }
}

impl Messages {
    fn title(&self) -> Option<&str> {
        self.title.as_ref().and_then(I18n::value)
    }

    fn description(&self) -> Option<&str> {
        self.description.as_ref().and_then(I18n::value)
    }
}

#[derive(Debug, Deserialize)]
struct Network {
    address: String,
}

#[derive(Debug, Deserialize)]
struct Argument {
    index: usize,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    messages: Messages,
}

impl InteractionTemplate {
    pub(crate) fn into_descriptor(self) -> Result<TemplateDescriptor> {
        let data = self.data;

        let parameters = data
            .arguments
            .iter()
            .map(|(name, arg)| RawParameter {
                name: name.clone(),
                index: arg.index,
                ty: arg.ty.clone(),
                description: arg.messages.title().unwrap_or_default().to_string(),
            })
            .collect();

        let dependencies = data
            .dependencies
            .iter()
            .flat_map(|(placeholder, contracts)| {
                contracts.iter().map(move |(contract, networks)| ContractDependency {
                    contract: contract.clone(),
                    placeholder: Some(placeholder.clone()),
                    networks: networks
                        .iter()
                        .map(|(name, network)| (name.clone(), network.address.clone()))
                        .collect(),
                })
            })
            .collect();

        RawTemplate {
            id: self.id,
            computed_id: None,
            version: self.f_version,
            kind: data.kind,
            title: data.messages.title().map(str::to_string),
            description: data.messages.description().map(str::to_string),
            cadence: data.cadence,
            parameters,
            dependencies,
            output: None,
        }
        .build()
    }
}
