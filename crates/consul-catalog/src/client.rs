//! Asynchronous Consul catalog client.

use crate::models::{Node, NodeServices, ServiceAndNode};
use crate::parse::{parse_datacenters, parse_node, parse_nodes, parse_service, parse_services};
use crate::Result;
use consul_core::helpers::encode_path_segment;
use consul_core::params::{self, groups, ParamGroup};
use consul_core::{Consistency, Param, ParamName, Tag, Tags, Transport};
use std::collections::HashMap;
use std::fmt;
use std::iter;
use tracing::debug;

const DATACENTERS_PATH: &str = "/v1/catalog/datacenters";
const NODES_PATH: &str = "/v1/catalog/nodes";
const NODE_PATH: &str = "/v1/catalog/node";
const SERVICES_PATH: &str = "/v1/catalog/services";
const SERVICE_PATH: &str = "/v1/catalog/service";

/// Read-only client for the Consul catalog.
///
/// Borrows a shared [`Transport`] (normally [`consul_core::Consul`]) and carries a default
/// consistency mode fixed at construction. Every query accepts an explicit
/// [`Consistency`] override; without one the default is sent.
pub struct Catalog<'a, T: Transport + ?Sized> {
    consul: &'a T,
    default_consistency: Consistency,
}

impl<'a, T: Transport + ?Sized> Catalog<'a, T> {
    /// Create a catalog client using the agent's default consistency mode.
    #[must_use]
    pub fn new(consul: &'a T) -> Self {
        Self {
            consul,
            default_consistency: Consistency::Default,
        }
    }

    /// Create a catalog client with construction parameters.
    ///
    /// Accepts `consistency` only, used as the default for every query.
    ///
    /// # Errors
    ///
    /// Returns [`consul_core::Error::InvalidParameter`] for any other or repeated parameter.
    pub fn with_params(consul: &'a T, params: &[Param]) -> Result<Self> {
        groups::CLIENT.validate(params)?;
        Ok(Self {
            consul,
            default_consistency: params::get_or(params, Consistency::Default),
        })
    }

    /// Consistency mode sent when a query does not override it.
    #[must_use]
    pub fn default_consistency(&self) -> Consistency {
        self.default_consistency
    }

    /// List known datacenters.
    pub async fn datacenters(&self) -> Result<Vec<String>> {
        debug!(path = DATACENTERS_PATH, "catalog query");
        let body = self.consul.get(DATACENTERS_PATH, &[]).await?;
        parse_datacenters(&body)
    }

    /// List nodes in the datacenter.
    ///
    /// Accepts `consistency` and `block_for`.
    pub async fn nodes(&self, params: &[Param]) -> Result<Vec<Node>> {
        let body = self.query(&groups::GET, NODES_PATH, params).await?;
        parse_nodes(&body)
    }

    /// Fetch a node and the service instances registered on it.
    ///
    /// If the node does not exist the result holds [`Node::invalid`] and no services.
    /// Accepts `consistency` and `block_for`.
    pub async fn node(&self, name: &str, params: &[Param]) -> Result<NodeServices> {
        groups::GET.validate(params)?;
        let path = format!("{NODE_PATH}/{}", encode_path_segment(name)?);

        let result = parse_node(&self.fetch(&path, params).await?)?;
        if !result.is_found() {
            debug!(node = name, "catalog node not found");
        }
        Ok(result)
    }

    /// List service names with the union of their tags.
    ///
    /// Accepts `consistency` and `block_for`.
    pub async fn services(&self, params: &[Param]) -> Result<HashMap<String, Tags>> {
        let body = self.query(&groups::GET, SERVICES_PATH, params).await?;
        parse_services(&body)
    }

    /// List instances of a service with the nodes they run on.
    ///
    /// Accepts `consistency` and `block_for`.
    pub async fn service(&self, name: &str, params: &[Param]) -> Result<Vec<ServiceAndNode>> {
        groups::GET.validate(params)?;
        let path = format!("{SERVICE_PATH}/{}", encode_path_segment(name)?);
        parse_service(&self.fetch(&path, params).await?)
    }

    /// List instances of a service that carry `tag`.
    ///
    /// The filter is applied by the agent. Accepts `consistency` and `block_for`; the tag
    /// itself must not be repeated in `params`.
    pub async fn service_with_tag(
        &self,
        name: &str,
        tag: &str,
        params: &[Param],
    ) -> Result<Vec<ServiceAndNode>> {
        let supplied: Vec<Param> = iter::once(Param::from(Tag::new(tag)))
            .chain(params.iter().cloned())
            .collect();
        groups::TAGGED_GET.validate(&supplied)?;
        let path = format!("{SERVICE_PATH}/{}", encode_path_segment(name)?);
        parse_service(&self.fetch(&path, &supplied).await?)
    }

    async fn query(&self, group: &ParamGroup, path: &str, params: &[Param]) -> Result<String> {
        group.validate(params)?;
        self.fetch(path, params).await
    }

    async fn fetch(&self, path: &str, params: &[Param]) -> Result<String> {
        let resolved = self.resolve(params);
        debug!(path, params = resolved.len(), "catalog query");
        self.consul.get(path, &resolved).await
    }

    /// Replace any consistency override with the effective mode, placed first.
    fn resolve(&self, params: &[Param]) -> Vec<Param> {
        let consistency = params::get_or(params, self.default_consistency);
        iter::once(Param::from(consistency))
            .chain(
                params
                    .iter()
                    .filter(|param| param.name() != ParamName::Consistency)
                    .cloned(),
            )
            .collect()
    }
}

impl<T: Transport + ?Sized> Clone for Catalog<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Transport + ?Sized> Copy for Catalog<'_, T> {}

impl<T: Transport + ?Sized> fmt::Debug for Catalog<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("default_consistency", &self.default_consistency)
            .finish_non_exhaustive()
    }
}
