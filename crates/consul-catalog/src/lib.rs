//! Consul catalog client and data models.
//!
//! This crate exposes strongly typed entities and an asynchronous client for the
//! read-only Consul catalog API: datacenters, nodes, services, and which nodes run
//! which service instances.
//!
//! ```no_run
//! use consul_catalog::Catalog;
//! use consul_core::{Consistency, Consul};
//!
//! # async fn demo() -> consul_catalog::Result<()> {
//! let consul = Consul::new("http://127.0.0.1:8500")?;
//! let catalog = Catalog::with_params(&consul, &[Consistency::Stale.into()])?;
//!
//! for node in catalog.nodes(&[]).await? {
//!     println!("{} {}", node.name, node.address);
//! }
//! let web = catalog.service_with_tag("web", "prod", &[]).await?;
//! # let _ = web;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod parse;

pub use client::Catalog;
pub use models::{Node, NodeServices, ServiceAndNode};

/// Convenient result alias matching the shared Consul error type.
pub type Result<T> = consul_core::Result<T>;
