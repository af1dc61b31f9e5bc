#![forbid(unsafe_code)]
//! waypath-core library.
//!
//! The read-only graph store every query runs against, the definitions it is
//! built from, and the error taxonomy shared by the analytics and CLI crates.
//!
//! # Conventions
//!
//! - **Errors**: graph operations return [`error::GraphError`]; loaders and
//!   application code use `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod graph;

pub use error::{ErrorCode, GraphError};
pub use graph::{GraphDefinition, NodeIndex, WeightedGraph, WeightedGraphBuilder};
