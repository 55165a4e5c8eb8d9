//! Named optional query parameters and per-operation parameter groups.
//!
//! Every Consul read operation accepts a small, operation-specific set of optional
//! parameters. A [`Param`] is one named, typed value; a [`ParamGroup`] is the closed list
//! of names an operation family accepts. Operations call [`ParamGroup::validate`] before
//! building a request, so a disallowed or repeated parameter never reaches the network.
//!
//! ```
//! use consul_core::params::{self, groups, BlockFor, Consistency, Param};
//! use std::time::Duration;
//!
//! let supplied: Vec<Param> = vec![
//!     Consistency::Stale.into(),
//!     BlockFor::new(Duration::from_secs(5), 42).into(),
//! ];
//! groups::GET.validate(&supplied).unwrap();
//! assert_eq!(params::get_or(&supplied, Consistency::Default), Consistency::Stale);
//! ```

use crate::error::{Error, Result};
use crate::query::QueryParams;
use std::fmt;
use std::time::Duration;

/// Server-side read consistency mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Consistency {
    /// Leader-served read that may be stale for a brief window after a leader change
    #[default]
    Default,
    /// Any server may answer, possibly with stale data
    Stale,
    /// Leader verifies it is still leader before answering
    Consistent,
}

impl Consistency {
    /// Returns the mode name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Stale => "stale",
            Self::Consistent => "consistent",
        }
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking query parameters: hold the request until the index moves past `index`
/// or `wait` elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockFor {
    /// Maximum time the server holds the request
    pub wait: Duration,
    /// Index the caller has already observed
    pub index: u64,
}

impl BlockFor {
    /// Create blocking query parameters.
    #[must_use]
    pub const fn new(wait: Duration, index: u64) -> Self {
        Self { wait, index }
    }
}

/// Service tag filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    /// Create a tag filter.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Borrow the raw tag value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl From<String> for Tag {
    fn from(tag: String) -> Self {
        Self(tag)
    }
}

/// Name of an optional parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamName {
    /// `consistency`
    Consistency,
    /// `block_for`
    BlockFor,
    /// `tag`
    Tag,
}

impl ParamName {
    /// Returns the parameter name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Consistency => "consistency",
            Self::BlockFor => "block_for",
            Self::Tag => "tag",
        }
    }
}

impl fmt::Display for ParamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed optional parameter supplied to an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Param {
    /// Read consistency override
    Consistency(Consistency),
    /// Blocking query parameters
    BlockFor(BlockFor),
    /// Service tag filter
    Tag(Tag),
}

impl Param {
    /// Returns the name of this parameter.
    #[must_use]
    pub const fn name(&self) -> ParamName {
        match self {
            Self::Consistency(_) => ParamName::Consistency,
            Self::BlockFor(_) => ParamName::BlockFor,
            Self::Tag(_) => ParamName::Tag,
        }
    }
}

impl From<Consistency> for Param {
    fn from(value: Consistency) -> Self {
        Self::Consistency(value)
    }
}

impl From<BlockFor> for Param {
    fn from(value: BlockFor) -> Self {
        Self::BlockFor(value)
    }
}

impl From<Tag> for Param {
    fn from(value: Tag) -> Self {
        Self::Tag(value)
    }
}

/// Value type carried by one kind of [`Param`].
pub trait ParamValue: Clone + Into<Param> {
    /// Name of the parameter carrying this value.
    const NAME: ParamName;

    /// Borrow the value if `param` carries this kind.
    fn from_param(param: &Param) -> Option<&Self>;
}

impl ParamValue for Consistency {
    const NAME: ParamName = ParamName::Consistency;

    fn from_param(param: &Param) -> Option<&Self> {
        match param {
            Param::Consistency(value) => Some(value),
            _ => None,
        }
    }
}

impl ParamValue for BlockFor {
    const NAME: ParamName = ParamName::BlockFor;

    fn from_param(param: &Param) -> Option<&Self> {
        match param {
            Param::BlockFor(value) => Some(value),
            _ => None,
        }
    }
}

impl ParamValue for Tag {
    const NAME: ParamName = ParamName::Tag;

    fn from_param(param: &Param) -> Option<&Self> {
        match param {
            Param::Tag(value) => Some(value),
            _ => None,
        }
    }
}

/// Find the supplied value of kind `V`, if any.
#[must_use]
pub fn find<V: ParamValue>(params: &[Param]) -> Option<&V> {
    params.iter().find_map(V::from_param)
}

/// Return the supplied value of kind `V`, or `default` when it was not supplied.
#[must_use]
pub fn get_or<V: ParamValue>(params: &[Param], default: V) -> V {
    find::<V>(params).cloned().unwrap_or(default)
}

/// Closed list of parameter names accepted by one operation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamGroup {
    name: &'static str,
    permitted: &'static [ParamName],
}

impl ParamGroup {
    /// Declare a group.
    #[must_use]
    pub const fn new(name: &'static str, permitted: &'static [ParamName]) -> Self {
        Self { name, permitted }
    }

    /// Group name, used in error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Names accepted by this group.
    #[must_use]
    pub const fn permitted(&self) -> &'static [ParamName] {
        self.permitted
    }

    /// Returns true if `name` belongs to this group.
    #[must_use]
    pub fn permits(&self, name: ParamName) -> bool {
        self.permitted.contains(&name)
    }

    /// Check supplied parameters against this group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if a parameter is not in the group or the same
    /// name is supplied more than once.
    pub fn validate(&self, params: &[Param]) -> Result<()> {
        for (position, param) in params.iter().enumerate() {
            let name = param.name();
            if !self.permits(name) {
                return Err(Error::InvalidParameter(format!(
                    "`{name}` is not permitted for `{}` operations",
                    self.name
                )));
            }
            if params[..position].iter().any(|seen| seen.name() == name) {
                return Err(Error::InvalidParameter(format!(
                    "`{name}` supplied more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Parameter groups shared by Consul clients.
pub mod groups {
    use super::{ParamGroup, ParamName};

    /// Parameters accepted when constructing an API client (its defaults).
    pub const CLIENT: ParamGroup = ParamGroup::new("client", &[ParamName::Consistency]);

    /// Parameters accepted by plain read queries.
    pub const GET: ParamGroup =
        ParamGroup::new("get", &[ParamName::Consistency, ParamName::BlockFor]);

    /// Parameters accepted by read queries that filter by tag.
    pub const TAGGED_GET: ParamGroup = ParamGroup::new(
        "tagged_get",
        &[ParamName::Consistency, ParamName::BlockFor, ParamName::Tag],
    );
}

/// Encode parameters as URL query pairs.
///
/// Consistency becomes a bare `stale` or `consistent` flag (nothing for the default
/// mode), blocking parameters become `index` and `wait` (milliseconds), and a tag becomes
/// `tag`. Values are raw; the HTTP layer percent-encodes them.
#[must_use]
pub fn to_query(params: &[Param]) -> Vec<(&'static str, String)> {
    let mut query = QueryParams::new();
    for param in params {
        match param {
            Param::Consistency(Consistency::Default) => {}
            Param::Consistency(Consistency::Stale) => query.push_flag("stale"),
            Param::Consistency(Consistency::Consistent) => query.push_flag("consistent"),
            Param::BlockFor(block) => {
                query.push("index", block.index);
                query.push("wait", format!("{}ms", block.wait.as_millis()));
            }
            Param::Tag(tag) => query.push("tag", tag.as_str()),
        }
    }
    query.into_pairs()
}
