//! Raw metadata document shapes
//!
//! Mirrors the structure an OData v2 client produces when it parses a
//! `$metadata` document (`dataServices.schema[].entityType[]`, ...). Every
//! container is optional at this layer; missing structure is reported by the
//! normalizer, not by deserialization.

use crate::import::ImportError;
use serde::{Deserialize, Serialize};

/// Root of a raw `$metadata` document
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::models::RawMetadataDocument;
///
/// let doc = RawMetadataDocument::from_json(
///     r#"{"dataServices": {"schema": [{"entityType": []}]}}"#,
/// ).unwrap();
/// assert_eq!(doc.schemas().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetadataDocument {
    /// The `edmx:DataServices` container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_services: Option<RawDataServices>,
}

/// The `edmx:DataServices` container holding the schema list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDataServices {
    /// Schema entries in document order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Vec<RawSchema>>,
}

/// One `Schema` element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSchema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Entity types; `None` when the schema has no entity-type container at all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<Vec<RawEntityType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub association: Option<Vec<RawAssociation>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntityType {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<RawKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<Vec<RawProperty>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigation_property: Option<Vec<RawNavigationProperty>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawKey {
    #[serde(default)]
    pub property_ref: Vec<RawPropertyRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPropertyRef {
    pub name: String,
}

/// A scalar property with its vendor extensions (e.g. SAP `sap:` attributes)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProperty {
    pub name: String,
    /// OData type identifier, e.g. `Edm.String`
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<RawExtension>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExtension {
    pub name: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNavigationProperty {
    pub name: String,
    /// Possibly namespace-qualified association name
    pub relationship: String,
    pub from_role: String,
    pub to_role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssociation {
    pub name: String,
    #[serde(default)]
    pub end: Vec<RawAssociationEnd>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssociationEnd {
    pub role: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
}

impl RawMetadataDocument {
    /// Deserialize a raw document from the client JSON shape.
    pub fn from_json(content: &str) -> Result<Self, ImportError> {
        serde_json::from_str(content).map_err(|e| {
            ImportError::ParseError(format!("Failed to parse metadata JSON: {}", e))
        })
    }

    /// Schema entries in document order, empty when the container is missing.
    pub fn schemas(&self) -> &[RawSchema] {
        self.data_services
            .as_ref()
            .and_then(|ds| ds.schema.as_deref())
            .unwrap_or(&[])
    }
}

impl RawEntityType {
    /// Key property names in declaration order.
    pub fn key_names(&self) -> Vec<String> {
        self.key
            .as_ref()
            .map(|key| key.property_ref.iter().map(|r| r.name.clone()).collect())
            .unwrap_or_default()
    }
}
