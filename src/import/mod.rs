//! Import functionality
//!
//! Turns `$metadata` documents into normalized schemas:
//! - EDMX XML (`$metadata` as served by an OData v2 service)
//! - Client JSON (the structure an OData v2 client exposes after parsing)
//!
//! The normalization pipeline itself is split into the alias resolver, the
//! property flattener, the association joiner and the normalizer.

pub mod alias;
pub mod association;
#[cfg(feature = "xml")]
pub mod edmx;
pub mod normalizer;
pub mod property;

use crate::models::{RawMetadataDocument, Schema};
use tracing::info;

/// Error during import
#[derive(Debug, thiserror::Error, serde::Serialize, serde::Deserialize)]
pub enum ImportError {
    /// The document lacks the schema list or the first schema's entity-type container
    #[error("Malformed metadata document: {0}")]
    MalformedDocument(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("XML parse error: {0}")]
    XmlParseError(String),
}

/// Source format of a metadata document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    Edmx,
    Json,
}

impl MetadataFormat {
    /// Guess the format from content: a leading `<` means EDMX, anything else JSON.
    ///
    /// A leading byte order mark is ignored.
    pub fn detect(content: &str) -> Self {
        if strip_bom(content).trim_start().starts_with('<') {
            MetadataFormat::Edmx
        } else {
            MetadataFormat::Json
        }
    }
}

pub use alias::{local_name, resolve_alias_name};
pub use association::{JoinSides, find_association, find_end_type, join_navigation_property};
pub use normalizer::{MetadataNormalizer, NormalizeOptions, normalize};
pub use property::{ExtensionTag, flatten_property};

/// Reads metadata documents and normalizes them in one step.
#[derive(Debug, Default)]
pub struct MetadataImporter {
    normalizer: MetadataNormalizer,
}

impl MetadataImporter {
    /// Create an importer that normalizes only the first schema entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::import::MetadataImporter;
    ///
    /// let importer = MetadataImporter::new();
    /// let schema = importer
    ///     .import_json(r#"{"dataServices": {"schema": [{"entityType": [{"name": "Customer"}]}]}}"#)
    ///     .unwrap();
    /// assert_eq!(schema.entity_types[0].name, "Customer");
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NormalizeOptions) -> Self {
        Self {
            normalizer: MetadataNormalizer::with_options(options),
        }
    }

    /// Read a raw document without normalizing it.
    pub fn read(&self, content: &str, format: MetadataFormat) -> Result<RawMetadataDocument, ImportError> {
        let content = strip_bom(content);
        match format {
            MetadataFormat::Json => RawMetadataDocument::from_json(content),
            MetadataFormat::Edmx => read_edmx(content),
        }
    }

    /// Import client JSON and normalize its first schema.
    pub fn import_json(&self, content: &str) -> Result<Schema, ImportError> {
        self.import(content, MetadataFormat::Json)
    }

    /// Import EDMX XML and normalize its first schema.
    pub fn import_edmx(&self, content: &str) -> Result<Schema, ImportError> {
        self.import(content, MetadataFormat::Edmx)
    }

    /// Import content of either format, detected from the content itself.
    pub fn import_auto(&self, content: &str) -> Result<Schema, ImportError> {
        self.import(content, MetadataFormat::detect(content))
    }

    /// Import and normalize the first schema entry.
    pub fn import(&self, content: &str, format: MetadataFormat) -> Result<Schema, ImportError> {
        let document = self.read(content, format)?;
        self.normalizer.normalize(&document)
    }

    /// Import and normalize the schema entries selected by the importer's options.
    pub fn import_selected(
        &self,
        content: &str,
        format: MetadataFormat,
    ) -> Result<Vec<Schema>, ImportError> {
        let document = self.read(content, format)?;
        let schemas = self.normalizer.normalize_selected(&document)?;
        info!("Imported {} schema(s) from {:?} metadata", schemas.len(), format);
        Ok(schemas)
    }
}

/// Drop a leading UTF-8 byte order mark.
fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}

#[cfg(feature = "xml")]
fn read_edmx(content: &str) -> Result<RawMetadataDocument, ImportError> {
    edmx::parse_edmx(content)
}

#[cfg(not(feature = "xml"))]
fn read_edmx(_content: &str) -> Result<RawMetadataDocument, ImportError> {
    Err(ImportError::XmlParseError(
        "EDMX support not enabled. Enable 'xml' feature.".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_from_content() {
        assert_eq!(MetadataFormat::detect("  <?xml version=\"1.0\"?>"), MetadataFormat::Edmx);
        assert_eq!(MetadataFormat::detect("{\"dataServices\": {}}"), MetadataFormat::Json);
        assert_eq!(MetadataFormat::detect("\u{feff}<edmx:Edmx/>"), MetadataFormat::Edmx);
    }

    #[test]
    fn json_with_byte_order_mark_imports() {
        let content = "\u{feff}{\"dataServices\": {\"schema\": [{\"entityType\": [{\"name\": \"Customer\"}]}]}}";
        let schema = MetadataImporter::new().import_auto(content).unwrap();
        assert_eq!(schema.entity_types[0].name, "Customer");
    }

    #[test]
    fn malformed_document_surfaces_from_importer() {
        let err = MetadataImporter::new()
            .import_json(r#"{"dataServices": {"schema": []}}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::MalformedDocument(_)));
    }
}
