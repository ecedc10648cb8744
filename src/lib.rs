//! OData Explorer SDK - Schema normalization for OData v2 `$metadata`
//!
//! Provides unified interfaces for:
//! - Reading `$metadata` documents (client JSON, EDMX XML)
//! - Normalizing them into entity types with joined navigation properties
//! - Projecting schemas into node/edge graphs
//! - Export to Markdown, JSON/YAML and Graphviz DOT
//! - Diagnostics for unresolved relationships

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "config")]
pub mod config;
pub mod export;
pub mod import;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use export::{
    DotExporter, ExportError, ExportResult, GraphProjector, JsonExporter, MarkdownExporter,
};
pub use import::{
    ImportError, MetadataFormat, MetadataImporter, MetadataNormalizer, NormalizeOptions, normalize,
};
pub use validation::{DiagnosticsReport, SchemaDiagnostics};

// Re-export models
pub use models::{
    Association, AssociationEnd, EntityType, GraphAttribute, GraphEdge, GraphNode,
    NavigationProperty, Property, RawMetadataDocument, Schema, SchemaGraph,
};

#[cfg(feature = "config")]
pub use config::{ConfigError, ExplorerConfig};
