//! FLIX v1.1.0 document layout.

use super::{RawParameter, RawTemplate, PREFERRED_LANGUAGE};
use crate::error::Result;
use crate::template::{ContractDependency, TemplateDescriptor};
use rlp::RlpStream;
use serde::{Deserialize, Deserializer};
use sha3::{Digest, Sha3_256};

#[derive(Debug, Deserialize)]
pub(crate) struct InteractionTemplate {
    #[serde(default)]
    f_type: String,
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
    interface: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    messages: Vec<Message>,
    #[serde(default)]
    cadence: Cadence,
    #[serde(default, deserialize_with = "null_as_empty")]
    dependencies: Vec<Dependency>,
    #[serde(default, deserialize_with = "null_as_empty")]
    parameters: Vec<Parameter>,
    #[serde(default)]
    output: Option<Parameter>,
}

#[derive(Debug, Deserialize)]
struct Message {
    key: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    i18n: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    tag: String,
    translation: String,
}

#[derive(Debug, Default, Deserialize)]
struct Cadence {
    #[serde(default)]
    body: String,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    #[serde(default, deserialize_with = "null_as_empty")]
    contracts: Vec<Contract>,
}

#[derive(Debug, Deserialize)]
struct Contract {
    contract: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    networks: Vec<Network>,
}

#[derive(Debug, Deserialize)]
struct Network {
    network: String,
    address: String,
    #[serde(default)]
    dependency_pin: Option<DependencyPin>,
}

#[derive(Debug, Deserialize)]
struct DependencyPin {
    #[serde(default)]
    pin: String,
}

#[derive(Debug, Deserialize)]
struct Parameter {
    #[serde(default)]
    label: String,
    #[serde(default)]
    index: usize,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    messages: Vec<Message>,
}

/// Published documents write empty lists as `null`.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lowercase hex SHA3-256 of `value`.
fn sha_hex(value: &str) -> String {
    hex::encode(Sha3_256::digest(value.as_bytes()))
}

fn append_messages(stream: &mut RlpStream, messages: &[Message]) {
    stream.begin_list(messages.len());
    for message in messages {
        stream.begin_list(2);
        stream.append(&sha_hex(&message.key));
        stream.begin_list(message.i18n.len());
        for i18n in &message.i18n {
            stream.begin_list(2);
            stream.append(&sha_hex(&i18n.tag));
            stream.append(&sha_hex(&i18n.translation));
        }
    }
}

fn append_dependencies(stream: &mut RlpStream, dependencies: &[Dependency]) {
    stream.begin_list(dependencies.len());
    for dependency in dependencies {
        stream.begin_list(1);
        stream.begin_list(dependency.contracts.len());
        for contract in &dependency.contracts {
            stream.begin_list(2);
            stream.append(&sha_hex(&contract.contract));
            stream.begin_list(contract.networks.len());
            for network in &contract.networks {
                match &network.dependency_pin {
                    Some(pin) => {
                        stream.begin_list(2);
                        stream.append(&sha_hex(&network.network));
                        stream.append(&sha_hex(&pin.pin));
                    }
                    None => {
                        stream.begin_list(1);
                        stream.append(&sha_hex(&network.network));
                    }
                }
            }
        }
    }
}

fn append_parameters(stream: &mut RlpStream, parameters: &[Parameter]) {
    let mut ordered: Vec<&Parameter> = parameters.iter().collect();
    ordered.sort_by_key(|p| p.index);

    stream.begin_list(ordered.len());
    for param in ordered {
        stream.begin_list(2);
        stream.append(&sha_hex(&param.label));
        stream.begin_list(3);
        stream.append(&sha_hex(&param.index.to_string()));
        stream.append(&sha_hex(&param.ty));
        append_messages(stream, &param.messages);
    }
}

/// Translation for `key`: `en-US` if present, otherwise the last one listed.
fn message_value(messages: &[Message], key: &str) -> Option<String> {
    let mut value = None;
    for message in messages.iter().filter(|m| m.key == key) {
        for i18n in &message.i18n {
            value = Some(i18n.translation.as_str());
            if i18n.tag == PREFERRED_LANGUAGE {
                break;
            }
        }
    }
    value.map(|v| v.trim().to_string())
}

impl InteractionTemplate {
    /// Content id of the document.
    ///
    /// Every field is hashed on its own, the hashes are RLP encoded in a
    /// fixed shape, and the hex of that encoding is hashed once more.
    pub(crate) fn compute_id(&self) -> String {
        let data = &self.data;
        let mut stream = RlpStream::new_list(8);
        stream.append(&sha_hex(&self.f_type));
        stream.append(&sha_hex(&self.f_version));
        stream.append(&sha_hex(&data.kind));
        stream.append(&sha_hex(&data.interface));
        append_messages(&mut stream, &data.messages);
        stream.append(&sha_hex(&data.cadence.body));
        append_dependencies(&mut stream, &data.dependencies);
        append_parameters(&mut stream, &data.parameters);

        sha_hex(&hex::encode(stream.out()))
    }

    pub(crate) fn into_descriptor(self) -> Result<TemplateDescriptor> {
        let computed_id = self.compute_id();
        let data = self.data;

        let parameters = data
            .parameters
            .iter()
            .map(|p| RawParameter {
                name: p.label.clone(),
                index: p.index,
                ty: p.ty.clone(),
                description: message_value(&p.messages, "title").unwrap_or_default(),
            })
            .collect();

        let dependencies = data
            .dependencies
            .iter()
            .flat_map(|d| d.contracts.iter())
            .map(|c| ContractDependency {
                contract: c.contract.clone(),
                placeholder: None,
                networks: c
                    .networks
                    .iter()
                    .map(|n| (n.network.clone(), n.address.clone()))
                    .collect(),
            })
            .collect();

        RawTemplate {
            id: self.id,
            computed_id: Some(computed_id),
            version: self.f_version,
            title: message_value(&data.messages, "title"),
            description: message_value(&data.messages, "description"),
            kind: data.kind,
            cadence: data.cadence.body,
            parameters,
            dependencies,
            output: data.output.map(|o| o.ty),
        }
        .build()
    }
}
