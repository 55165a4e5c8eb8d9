//! Catalog entities.

use consul_core::Service;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A node registered in the catalog.
///
/// A node with an empty name or address is invalid; [`Node::invalid`] is what lookups
/// return for a node that does not exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Node name.
    #[serde(rename = "Node")]
    pub name: String,
    /// Node address.
    #[serde(rename = "Address")]
    pub address: String,
}

impl Node {
    /// Create a node.
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// The not-found sentinel: empty name and address.
    #[must_use]
    pub fn invalid() -> Self {
        Self::default()
    }

    /// Returns true if both name and address are non-empty.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.address.is_empty()
    }
}

/// A node together with the service instances registered on it, keyed by service id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeServices {
    /// The node; invalid when the node does not exist.
    pub node: Node,
    /// Service instances keyed by instance id.
    pub services: HashMap<String, Service>,
}

impl NodeServices {
    /// Result for a node that does not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Returns true if the node exists.
    #[must_use]
    pub fn is_found(&self) -> bool {
        self.node.is_valid()
    }
}

/// One service instance and the node it runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAndNode {
    /// The service instance.
    pub service: Service,
    /// The node hosting it.
    pub node: Node,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_equality_is_structural() {
        let node = Node::new("n1", "10.0.0.1");
        assert_eq!(node, Node::new("n1", "10.0.0.1"));
        assert_ne!(node, Node::new("n2", "10.0.0.1"));
        assert_ne!(node, Node::new("n1", "10.0.0.2"));
    }

    #[test]
    fn node_validity() {
        assert!(Node::new("n1", "10.0.0.1").is_valid());
        assert!(!Node::new("n1", "").is_valid());
        assert!(!Node::new("", "10.0.0.1").is_valid());
        assert!(!Node::invalid().is_valid());
        assert_eq!(Node::invalid(), Node::new("", ""));
    }

    #[test]
    fn not_found_is_invalid_and_empty() {
        let result = NodeServices::not_found();
        assert!(!result.is_found());
        assert!(result.services.is_empty());
    }
}
