//! Export functionality
//!
//! Provides the graph projection and exporters for:
//! - Markdown (list/detail documentation of a schema)
//! - JSON / YAML (schemas and projected graphs)
//! - Graphviz DOT (projected graphs)

pub mod dot;
pub mod graph;
pub mod json;
pub mod markdown;

/// Result of an export operation.
///
/// Contains the exported content and format identifier.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[must_use = "export results contain the exported content and should be used"]
pub struct ExportResult {
    /// Exported content
    pub content: String,
    /// Format identifier
    pub format: String,
}

/// Error during export
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Export error: {0}")]
    ExportError(String),
}

// Re-export for convenience
pub use dot::DotExporter;
pub use graph::{GraphProjector, display_type, project};
pub use json::JsonExporter;
pub use markdown::MarkdownExporter;
