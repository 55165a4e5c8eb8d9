//! Entities shared between Consul endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Tags attached to a service, ordered and de-duplicated.
pub type Tags = BTreeSet<String>;

/// A service instance registered with Consul.
///
/// Serialises in the agent/catalog node shape (`ID`, `Service`, `Tags`, `Address`, `Port`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique instance id on its node
    #[serde(rename = "ID")]
    pub id: String,
    /// Service name
    #[serde(rename = "Service")]
    pub name: String,
    /// Tags attached to this instance
    #[serde(rename = "Tags", default, deserialize_with = "null_as_default")]
    pub tags: Tags,
    /// Instance address; empty means the node address is used
    #[serde(rename = "Address", default)]
    pub address: String,
    /// Instance port
    #[serde(rename = "Port", default)]
    pub port: u16,
}

impl Service {
    /// Returns true if the instance carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Deserialize `null` as the type's default value.
///
/// Consul encodes empty collections as `null`; use with
/// `#[serde(default, deserialize_with = "null_as_default")]`.
///
/// # Errors
///
/// Propagates the inner deserializer's error for any other mismatched value.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
