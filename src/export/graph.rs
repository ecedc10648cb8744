//! Graph projection
//!
//! Projects a normalized [`Schema`] into nodes (entity types) and edges
//! (associations). An edge is added once per `(from_role, to_role)` pair
//! across the whole schema. The reverse pair of an association already drawn
//! adds no second edge, so an association navigated from both sides yields a
//! single edge in first-discovery direction.

use crate::import::alias::local_name;
use crate::import::association::{JoinSides, join_navigation_property};
use crate::models::{GraphAttribute, GraphEdge, GraphNode, NavigationProperty, Schema, SchemaGraph};
use std::collections::HashSet;
use tracing::{debug, info};

/// Number of leading characters dropped from a property type for display (`Edm.`)
const TYPE_PREFIX_LEN: usize = 4;

/// Graph projector
#[derive(Debug, Default)]
pub struct GraphProjector;

impl GraphProjector {
    /// Create a new graph projector
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::export::graph::GraphProjector;
    /// use odata_explorer_sdk::models::Schema;
    ///
    /// let graph = GraphProjector::new().project(&Schema::default());
    /// assert!(graph.nodes.is_empty());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Project `schema` into a node/edge graph.
    ///
    /// Node order follows entity-type order; edge order is first-discovery
    /// order. A navigation property contributes an attribute row (and possibly
    /// an edge) only when its association and both of its roles resolve.
    pub fn project(&self, schema: &Schema) -> SchemaGraph {
        let mut nodes = Vec::with_capacity(schema.entity_types.len());
        let mut edges = Vec::new();
        let mut seen = SeenEdges::default();

        for entity in &schema.entity_types {
            let mut attributes: Vec<GraphAttribute> = entity
                .properties
                .iter()
                .map(|property| GraphAttribute::new(&property.name, display_type(&property.type_name)))
                .collect();

            attributes.push(GraphAttribute::separator());

            for navigation in &entity.navigation_properties {
                let Some((from_type, to_type)) = resolve_both(navigation, schema) else {
                    debug!(
                        "Skipping unresolved navigation property {}.{}",
                        entity.name, navigation.name
                    );
                    continue;
                };

                attributes.push(GraphAttribute::new(&navigation.name, to_type.clone()));

                if seen.insert(navigation) {
                    edges.push(GraphEdge {
                        from: from_type,
                        to: to_type,
                    });
                }
            }

            nodes.push(GraphNode {
                key: entity.name.clone(),
                title: entity.name.clone(),
                key_summary: entity.key_summary(),
                attributes,
            });
        }

        info!("Projected {} nodes and {} edges", nodes.len(), edges.len());

        SchemaGraph { nodes, edges }
    }
}

/// Project `schema` into a node/edge graph.
pub fn project(schema: &Schema) -> SchemaGraph {
    GraphProjector::new().project(schema)
}

/// Property type as shown in a node: the first four characters removed.
///
/// No prefix check is made, so `Edm.String` becomes `String` while a type
/// shorter than four characters becomes empty.
pub fn display_type(type_name: &str) -> String {
    type_name.chars().skip(TYPE_PREFIX_LEN).collect()
}

/// Role pairs already drawn as edges
#[derive(Debug, Default)]
struct SeenEdges {
    /// Ordered `(from_role, to_role)` pairs
    role_pairs: HashSet<(String, String)>,
    /// Association name with its sorted role pair
    associations: HashSet<(String, String, String)>,
}

impl SeenEdges {
    /// Record `navigation`; true when it needs a new edge.
    fn insert(&mut self, navigation: &NavigationProperty) -> bool {
        let ordered = (navigation.from_role.clone(), navigation.to_role.clone());
        let association = association_key(navigation);
        let new_pair = !self.role_pairs.contains(&ordered);
        let new_association = !self.associations.contains(&association);
        self.role_pairs.insert(ordered);
        self.associations.insert(association);
        new_pair && new_association
    }
}

/// Association local name plus the unordered role pair
fn association_key(navigation: &NavigationProperty) -> (String, String, String) {
    let name = local_name(&navigation.relationship).to_string();
    let (a, b) = (&navigation.from_role, &navigation.to_role);
    if a <= b {
        (name, a.clone(), b.clone())
    } else {
        (name, b.clone(), a.clone())
    }
}

/// Re-resolve both ends from the schema's associations, ignoring any types
/// already present on the navigation property.
fn resolve_both(navigation: &NavigationProperty, schema: &Schema) -> Option<(String, String)> {
    let unresolved = NavigationProperty {
        from_type: None,
        to_type: None,
        ..navigation.clone()
    };
    let joined = join_navigation_property(&unresolved, &schema.associations, JoinSides::Both);
    joined.from_type.zip(joined.to_type)
}
