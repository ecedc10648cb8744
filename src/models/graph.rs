//! Graph projection model
//!
//! Nodes are entity types, edges are deduplicated associations. This is the
//! shape handed to visualization layers.

use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Node/edge projection of a schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// One entity type rendered as a graph node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub key: String,
    pub title: String,
    /// Key property names joined with `,`
    pub key_summary: String,
    /// Property rows, an empty separator row, then navigation rows
    pub attributes: Vec<GraphAttribute>,
}

/// Label/value row shown inside a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphAttribute {
    pub label: String,
    pub value: String,
}

/// Directed relationship between two entity types
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
}

impl GraphAttribute {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// Empty row separating property rows from navigation rows
    pub fn separator() -> Self {
        Self::default()
    }

    pub fn is_separator(&self) -> bool {
        self.label.is_empty() && self.value.is_empty()
    }
}

impl SchemaGraph {
    pub fn node(&self, key: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Build a petgraph graph keyed by node key.
    ///
    /// Edges whose endpoints are not nodes of this graph are skipped.
    pub fn to_petgraph(&self) -> (Graph<String, (), Directed>, HashMap<String, NodeIndex>) {
        let mut graph = Graph::<String, (), Directed>::new();
        let mut node_map = HashMap::new();

        for node in &self.nodes {
            node_map
                .entry(node.key.clone())
                .or_insert_with(|| graph.add_node(node.key.clone()));
        }

        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (node_map.get(&edge.from), node_map.get(&edge.to)) {
                graph.add_edge(from, to, ());
            }
        }

        (graph, node_map)
    }
}
