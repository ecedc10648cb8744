//! Graphviz DOT exporter
//!
//! Renders a projected [`SchemaGraph`] as a DOT `digraph` with one record
//! node per entity type. Layout and rasterization are left to Graphviz.

use crate::export::{ExportError, ExportResult};
use crate::models::{GraphNode, SchemaGraph};
use petgraph::dot::{Config, Dot};

/// DOT exporter for projected graphs
#[derive(Debug, Default)]
pub struct DotExporter;

impl DotExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a graph to DOT text
    ///
    /// Edges whose endpoints are not nodes of the graph are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::export::DotExporter;
    /// use odata_explorer_sdk::models::SchemaGraph;
    ///
    /// let result = DotExporter::new().export(&SchemaGraph::default()).unwrap();
    /// assert!(result.content.starts_with("digraph"));
    /// ```
    pub fn export(&self, graph: &SchemaGraph) -> Result<ExportResult, ExportError> {
        let (petgraph, _) = graph.to_petgraph();

        let content = format!(
            "{:?}",
            Dot::with_attr_getters(
                &petgraph,
                &[Config::EdgeNoLabel, Config::NodeNoLabel],
                &|_, _| String::new(),
                &|_, (_, key)| match graph.node(key) {
                    Some(node) => format!("label = \"{}\" shape = record", record_label(node)),
                    None => format!("label = \"{}\"", escape_record(key)),
                },
            )
        );
        if content.is_empty() {
            return Err(ExportError::ExportError("Empty DOT output".to_string()));
        }

        tracing::debug!(
            "Rendered DOT graph with {} nodes and {} edges",
            petgraph.node_count(),
            petgraph.edge_count()
        );

        Ok(ExportResult {
            content,
            format: "dot".to_string(),
        })
    }
}

/// Record label: title, key summary, property rows, navigation rows.
fn record_label(node: &GraphNode) -> String {
    let mut fields = vec![escape_record(&node.title)];
    if !node.key_summary.is_empty() {
        fields.push(format!("key: {}", escape_record(&node.key_summary)));
    }

    let mut block = String::new();
    for attribute in &node.attributes {
        if attribute.is_separator() {
            fields.push(std::mem::take(&mut block));
            continue;
        }
        block.push_str(&format!(
            "{}: {}\\l",
            escape_record(&attribute.label),
            escape_record(&attribute.value)
        ));
    }
    if !block.is_empty() {
        fields.push(block);
    }

    format!("{{{}}}", fields.join("|"))
}

fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '"' | '{' | '}' | '|' | '<' | '>' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\n' => escaped.push(' '),
            _ => escaped.push(c),
        }
    }
    escaped
}
