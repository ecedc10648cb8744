//! JSON and YAML exporter
//!
//! Serializes schemas and projected graphs for consumption by external
//! presentation and visualization layers.

use crate::export::{ExportError, ExportResult};
use crate::models::{Schema, SchemaGraph};
use serde::Serialize;

/// Exporter for JSON/YAML dumps of schemas and graphs
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    pub fn new() -> Self {
        Self
    }

    /// Export a schema as pretty-printed JSON
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::export::JsonExporter;
    /// use odata_explorer_sdk::models::{EntityType, Schema};
    ///
    /// let schema = Schema {
    ///     namespace: None,
    ///     entity_types: vec![EntityType::new("Customer")],
    ///     associations: Vec::new(),
    /// };
    /// let result = JsonExporter::new().export_schema(&schema).unwrap();
    /// assert!(result.content.contains("\"entityTypes\""));
    /// ```
    pub fn export_schema(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        to_json(schema)
    }

    /// Export a projected graph as pretty-printed JSON (`{"nodes": [...], "edges": [...]}`)
    pub fn export_graph(&self, graph: &SchemaGraph) -> Result<ExportResult, ExportError> {
        to_json(graph)
    }

    /// Export several schemas as one JSON array
    pub fn export_schemas(&self, schemas: &[Schema]) -> Result<ExportResult, ExportError> {
        to_json(&schemas)
    }

    pub fn export_schema_yaml(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        to_yaml(schema)
    }

    pub fn export_schemas_yaml(&self, schemas: &[Schema]) -> Result<ExportResult, ExportError> {
        to_yaml(&schemas)
    }

    pub fn export_graph_yaml(&self, graph: &SchemaGraph) -> Result<ExportResult, ExportError> {
        to_yaml(graph)
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<ExportResult, ExportError> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| ExportError::SerializationError(format!("Failed to serialize JSON: {}", e)))?;
    Ok(ExportResult {
        content,
        format: "json".to_string(),
    })
}

fn to_yaml<T: Serialize>(value: &T) -> Result<ExportResult, ExportError> {
    let content = serde_yaml::to_string(value)
        .map_err(|e| ExportError::SerializationError(format!("Failed to serialize YAML: {}", e)))?;
    Ok(ExportResult {
        content,
        format: "yaml".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntityType, GraphEdge, Property};

    #[test]
    fn schema_json_round_trips_through_serde() {
        let mut entity = EntityType::new("Customer");
        entity.properties.push(Property::new("Name", "Edm.String"));
        let schema = Schema {
            namespace: Some("Demo".to_string()),
            entity_types: vec![entity],
            associations: Vec::new(),
        };
        let result = JsonExporter::new().export_schema(&schema).unwrap();
        assert_eq!(result.format, "json");
        assert!(result.content.contains("\"type\": \"Edm.String\""));
        let parsed: Schema = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed, schema);
    }

    #[test]
    fn graph_yaml_lists_edges() {
        let graph = SchemaGraph {
            nodes: Vec::new(),
            edges: vec![GraphEdge {
                from: "Customer".to_string(),
                to: "Order".to_string(),
            }],
        };
        let result = JsonExporter::new().export_graph_yaml(&graph).unwrap();
        assert_eq!(result.format, "yaml");
        assert!(result.content.contains("from: Customer"));
        assert!(result.content.contains("to: Order"));
    }
}
