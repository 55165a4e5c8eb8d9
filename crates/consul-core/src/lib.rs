//! # consul-core
//!
//! Core types and utilities for working with the Consul HTTP API.
//!
//! This crate provides the shared error type, client configuration, the typed
//! optional-parameter contract and the HTTP transport that API-specific crates
//! (such as `consul-catalog`) build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`config`] - Configuration structures for Consul clients
//! - [`params`] - Named optional query parameters and per-operation groups
//! - [`transport`] - The transport seam consumed by API clients
//! - [`client`] - The reqwest-backed [`Consul`] transport
//! - [`helpers`] - URL path segment encoding
//! - [`query`] - Query pair builder used by the parameter encoder
//! - [`types`] - Entities shared between Consul endpoints

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod helpers;
pub mod params;
pub mod query;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use client::{Consul, ConsulBuilder};
pub use error::{Error, Result};
pub use params::{BlockFor, Consistency, Param, ParamGroup, ParamName, Tag};
pub use transport::Transport;
pub use types::{Service, Tags};
