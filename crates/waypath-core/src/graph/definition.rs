//! Serializable graph definitions (TOML or JSON files).
//!
//! A definition is the literal form of a graph: node declarations with their
//! ordered neighbor lists, plus a flat table of directed weights.
//!
//! ```toml
//! name = "kingdom"
//!
//! [[nodes]]
//! name = "start"
//! neighbors = ["forest", "city"]
//!
//! [[edges]]
//! from = "start"
//! to = "forest"
//! weight = 70
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::GraphError;
use crate::graph::store::WeightedGraph;

/// A graph as written in a definition file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDefinition {
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Nodes in declaration order.
    #[serde(default)]
    pub nodes: Vec<NodeDefinition>,
    /// Directed weights.
    #[serde(default)]
    pub edges: Vec<EdgeDefinition>,
}

/// One `[[nodes]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDefinition {
    pub name: String,
    #[serde(default)]
    pub neighbors: Vec<String>,
}

/// One `[[edges]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    pub from: String,
    pub to: String,
    pub weight: f64,
}

/// On-disk encoding of a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl DefinitionFormat {
    /// Pick the format from a file extension; anything but `.json` is TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

impl GraphDefinition {
    /// Parse a TOML definition.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is not a valid TOML definition.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("parse TOML graph definition")
    }

    /// Parse a JSON definition.
    ///
    /// # Errors
    ///
    /// Returns an error if `input` is not a valid JSON definition.
    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("parse JSON graph definition")
    }

    /// Read a definition file, choosing the parser by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let def = match DefinitionFormat::from_path(path) {
            DefinitionFormat::Json => Self::from_json_str(&content),
            DefinitionFormat::Toml => Self::from_toml_str(&content),
        }
        .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(
            nodes = def.nodes.len(),
            edges = def.edges.len(),
            "loaded graph definition"
        );
        Ok(def)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("serialize graph definition")
    }

    /// Build the immutable graph.
    ///
    /// # Errors
    ///
    /// See [`crate::graph::WeightedGraphBuilder::build`].
    pub fn build(&self) -> Result<WeightedGraph, GraphError> {
        let mut builder = WeightedGraph::builder();
        for node in &self.nodes {
            builder.node_with_neighbors(node.name.as_str(), node.neighbors.iter().map(String::as_str));
        }
        for edge in &self.edges {
            builder.weight(edge.from.as_str(), edge.to.as_str(), edge.weight);
        }
        builder.build()
    }
}
