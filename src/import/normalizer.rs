//! Schema normalization
//!
//! Turns a raw `$metadata` document into a [`Schema`]: properties are
//! flattened, navigation properties are joined to their association ends and
//! associations are reshaped. Document order is preserved throughout.

use super::ImportError;
use super::association::{JoinSides, join_navigation_property};
use super::property::flatten_property;
use crate::models::{
    Association, AssociationEnd, EntityType, NavigationProperty, RawAssociation, RawEntityType,
    RawMetadataDocument, RawSchema, Schema,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Normalization options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizeOptions {
    /// Normalize every schema entry instead of only the first one
    #[serde(default)]
    pub all_schemas: bool,
}

/// Schema normalizer
#[derive(Debug, Default)]
pub struct MetadataNormalizer {
    options: NormalizeOptions,
}

impl MetadataNormalizer {
    /// Create a normalizer that processes only the first schema entry
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::import::normalizer::MetadataNormalizer;
    ///
    /// let normalizer = MetadataNormalizer::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> NormalizeOptions {
        self.options
    }

    /// Normalize the first schema entry of `document`.
    ///
    /// # Errors
    ///
    /// `ImportError::MalformedDocument` when the document has no schema
    /// entries, or the first entry has no entity-type list at all. An empty
    /// entity-type list is valid and yields an empty schema.
    pub fn normalize(&self, document: &RawMetadataDocument) -> Result<Schema, ImportError> {
        let schemas = document.schemas();
        let first = schemas.first().ok_or_else(|| {
            ImportError::MalformedDocument("document contains no schema entries".to_string())
        })?;

        if schemas.len() > 1 {
            warn!(
                "Document contains {} schema entries; only the first is normalized",
                schemas.len()
            );
        }

        normalize_schema(first, 0)
    }

    /// Normalize every schema entry independently.
    ///
    /// Navigation properties are joined only against the associations of
    /// their own schema entry. The first entry is validated as in
    /// [`normalize`](Self::normalize); later entries without an entity-type
    /// container (entity-container-only schemas) are skipped.
    pub fn normalize_all(&self, document: &RawMetadataDocument) -> Result<Vec<Schema>, ImportError> {
        let schemas = document.schemas();
        let first = schemas.first().ok_or_else(|| {
            ImportError::MalformedDocument("document contains no schema entries".to_string())
        })?;

        let mut normalized = vec![normalize_schema(first, 0)?];
        for (idx, raw) in schemas.iter().enumerate().skip(1) {
            if raw.entity_type.is_none() {
                debug!(
                    "Skipping schema[{}] {}: no entity type container",
                    idx,
                    raw.namespace.as_deref().unwrap_or("<unnamed>")
                );
                continue;
            }
            normalized.push(normalize_schema(raw, idx)?);
        }

        Ok(normalized)
    }

    /// Normalize according to the configured options.
    ///
    /// Returns a single schema unless `all_schemas` is set.
    pub fn normalize_selected(
        &self,
        document: &RawMetadataDocument,
    ) -> Result<Vec<Schema>, ImportError> {
        if self.options.all_schemas {
            self.normalize_all(document)
        } else {
            self.normalize(document).map(|schema| vec![schema])
        }
    }
}

/// Normalize the first schema entry of `document`.
///
/// Shorthand for `MetadataNormalizer::new().normalize(document)`.
pub fn normalize(document: &RawMetadataDocument) -> Result<Schema, ImportError> {
    MetadataNormalizer::new().normalize(document)
}

fn normalize_schema(raw: &RawSchema, index: usize) -> Result<Schema, ImportError> {
    let raw_entity_types = raw.entity_type.as_ref().ok_or_else(|| {
        ImportError::MalformedDocument(format!(
            "schema[{}] has no entity type container",
            index
        ))
    })?;

    let associations: Vec<Association> = raw
        .association
        .iter()
        .flatten()
        .map(reshape_association)
        .collect();

    let entity_types: Vec<EntityType> = raw_entity_types
        .iter()
        .map(|entity| normalize_entity_type(entity, &associations))
        .collect();

    info!(
        "Normalized schema {} with {} entity types and {} associations",
        raw.namespace.as_deref().unwrap_or("<unnamed>"),
        entity_types.len(),
        associations.len()
    );

    Ok(Schema {
        namespace: raw.namespace.clone(),
        entity_types,
        associations,
    })
}

fn normalize_entity_type(raw: &RawEntityType, associations: &[Association]) -> EntityType {
    let properties = raw
        .property
        .iter()
        .flatten()
        .map(flatten_property)
        .collect::<Vec<_>>();

    let navigation_properties = raw
        .navigation_property
        .iter()
        .flatten()
        .map(|nav| {
            let navigation = NavigationProperty::new(
                nav.name.clone(),
                nav.relationship.clone(),
                nav.from_role.clone(),
                nav.to_role.clone(),
            );
            let joined = join_navigation_property(&navigation, associations, JoinSides::Target);
            if joined.to_type.is_none() {
                warn!(
                    "Navigation property {}.{} could not be resolved through '{}'",
                    raw.name, joined.name, joined.relationship
                );
            }
            joined
        })
        .collect::<Vec<_>>();

    debug!(
        "Entity type {}: {} properties, {} navigation properties",
        raw.name,
        properties.len(),
        navigation_properties.len()
    );

    EntityType {
        name: raw.name.clone(),
        key_properties: raw.key_names(),
        properties,
        navigation_properties,
    }
}

fn reshape_association(raw: &RawAssociation) -> Association {
    Association {
        name: raw.name.clone(),
        ends: raw
            .end
            .iter()
            .map(|end| AssociationEnd {
                role: end.role.clone(),
                type_name: end.type_name.clone(),
                multiplicity: end.multiplicity.clone(),
            })
            .collect(),
    }
}
