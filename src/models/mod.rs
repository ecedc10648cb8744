//! Models module for the SDK
//!
//! Defines the raw `$metadata` document shapes, the normalized schema and
//! the graph projection handed to visualization layers.

pub mod graph;
pub mod raw;
pub mod schema;

pub use graph::{GraphAttribute, GraphEdge, GraphNode, SchemaGraph};
pub use raw::{
    RawAssociation, RawAssociationEnd, RawDataServices, RawEntityType, RawExtension, RawKey,
    RawMetadataDocument, RawNavigationProperty, RawProperty, RawPropertyRef, RawSchema,
};
pub use schema::{
    Association, AssociationEnd, EntityType, Extension, NavigationProperty, Property, Schema,
};
