//! Mapping of catalog response bodies onto typed entities.
//!
//! Each function is pure: it takes the raw JSON body of one catalog endpoint and returns
//! the typed value or [`Error::DecodeError`]. The only shape that maps to a default value
//! is the documented missing-node case of [`parse_node`].

use crate::models::{Node, NodeServices, ServiceAndNode};
use crate::Result;
use consul_core::types::null_as_default;
use consul_core::{Error, Service, Tags};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

/// Body of `/v1/catalog/node/<name>`.
#[derive(Deserialize)]
struct NodeServicesBody {
    #[serde(rename = "Node", default)]
    node: Option<Node>,
    #[serde(rename = "Services", default, deserialize_with = "null_as_default")]
    services: HashMap<String, Service>,
}

/// One element of `/v1/catalog/service/<name>`.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceNodeBody {
    node: String,
    address: String,
    #[serde(rename = "ServiceID")]
    service_id: String,
    service_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    service_tags: Tags,
    #[serde(default)]
    service_address: String,
    #[serde(default)]
    service_port: u16,
}

impl From<ServiceNodeBody> for ServiceAndNode {
    fn from(body: ServiceNodeBody) -> Self {
        Self {
            service: Service {
                id: body.service_id,
                name: body.service_name,
                tags: body.service_tags,
                address: body.service_address,
                port: body.service_port,
            },
            node: Node::new(body.node, body.address),
        }
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, json: &str) -> Result<T> {
    serde_json::from_str(json)
        .map_err(|err| Error::DecodeError(format!("catalog {endpoint}: {err}")))
}

/// Parse the datacenter list, preserving server order.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] unless the body is an array of strings.
pub fn parse_datacenters(json: &str) -> Result<Vec<String>> {
    decode("datacenters", json)
}

/// Parse the node list, one [`Node`] per element in server order.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] if an element lacks `Node` or `Address`.
pub fn parse_nodes(json: &str) -> Result<Vec<Node>> {
    decode("nodes", json)
}

/// Parse a single node and its services.
///
/// A `null` body, or a `null`/absent `Node` member, means the node does not exist and
/// yields [`NodeServices::not_found`]. A `null` `Services` member is an empty map.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] for any other shape mismatch.
pub fn parse_node(json: &str) -> Result<NodeServices> {
    let value: Value = decode("node", json)?;
    if !value.is_object() {
        return match value {
            Value::Null => Ok(NodeServices::not_found()),
            other => Err(Error::DecodeError(format!(
                "catalog node: expected object or null, found {other}"
            ))),
        };
    }

    let body: NodeServicesBody = serde_json::from_value(value)
        .map_err(|err| Error::DecodeError(format!("catalog node: {err}")))?;

    Ok(match body.node {
        Some(node) => NodeServices {
            node,
            services: body.services,
        },
        None => NodeServices::not_found(),
    })
}

/// Parse the service-name to tags map.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] unless the body is an object of string arrays.
pub fn parse_services(json: &str) -> Result<HashMap<String, Tags>> {
    decode("services", json)
}

/// Parse the instances of one service with their nodes, in server order.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] if an element lacks a node or service identity field.
pub fn parse_service(json: &str) -> Result<Vec<ServiceAndNode>> {
    let body: Vec<ServiceNodeBody> = decode("service", json)?;
    Ok(body.into_iter().map(ServiceAndNode::from).collect())
}
