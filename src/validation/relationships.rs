//! Relationship diagnostics
//!
//! Reports the navigation properties, edges and entity types the graph
//! projection could not place. Lookup misses are tolerated everywhere else
//! in the crate; this module is where they become visible.

use crate::export::graph::GraphProjector;
use crate::import::association::{find_association, find_end_type};
use crate::models::{GraphEdge, Schema};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Result of schema diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[must_use = "diagnostics should be checked for unresolved navigation and dangling edges"]
pub struct DiagnosticsReport {
    /// Navigation properties whose association or roles could not be resolved
    pub unresolved_navigation: Vec<UnresolvedNavigation>,
    /// Projected edges with an endpoint that is not an entity type of the schema
    pub dangling_edges: Vec<GraphEdge>,
    /// Entity types with no incident edge
    pub isolated_entity_types: Vec<String>,
}

impl DiagnosticsReport {
    /// True when nothing failed to resolve. Isolated entity types are not a failure.
    pub fn is_clean(&self) -> bool {
        self.unresolved_navigation.is_empty() && self.dangling_edges.is_empty()
    }
}

/// A navigation property that did not resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnresolvedNavigation {
    pub entity_type: String,
    pub navigation_property: String,
    pub reason: UnresolvedReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnresolvedReason {
    UnknownAssociation,
    UnknownFromRole,
    UnknownToRole,
}

impl std::fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnresolvedReason::UnknownAssociation => write!(f, "unknown association"),
            UnresolvedReason::UnknownFromRole => write!(f, "unknown from role"),
            UnresolvedReason::UnknownToRole => write!(f, "unknown to role"),
        }
    }
}

/// Schema diagnostics
#[derive(Default)]
pub struct SchemaDiagnostics;

impl SchemaDiagnostics {
    /// Create a new diagnostics runner
    ///
    /// # Example
    ///
    /// ```rust
    /// use odata_explorer_sdk::validation::relationships::SchemaDiagnostics;
    /// use odata_explorer_sdk::models::Schema;
    ///
    /// let report = SchemaDiagnostics::new().analyze(&Schema::default());
    /// assert!(report.is_clean());
    /// ```
    pub fn new() -> Self {
        Self
    }

    /// Analyze a schema. Never fails.
    pub fn analyze(&self, schema: &Schema) -> DiagnosticsReport {
        let unresolved_navigation = self.find_unresolved_navigation(schema);

        let graph = GraphProjector::new().project(schema);
        let entity_names: HashSet<&str> = schema
            .entity_types
            .iter()
            .map(|e| e.name.as_str())
            .collect();

        let dangling_edges: Vec<GraphEdge> = graph
            .edges
            .iter()
            .filter(|edge| {
                !entity_names.contains(edge.from.as_str()) || !entity_names.contains(edge.to.as_str())
            })
            .cloned()
            .collect();

        // Graph nodes are exactly the entity types; edges to unknown types are
        // dropped by to_petgraph, so they do not rescue an isolated node.
        let (petgraph, node_map) = graph.to_petgraph();
        let isolated_entity_types = schema
            .entity_types
            .iter()
            .filter(|entity| {
                node_map.get(&entity.name).is_some_and(|&idx| {
                    petgraph
                        .neighbors_directed(idx, Direction::Outgoing)
                        .next()
                        .is_none()
                        && petgraph
                            .neighbors_directed(idx, Direction::Incoming)
                            .next()
                            .is_none()
                })
            })
            .map(|entity| entity.name.clone())
            .collect();

        let report = DiagnosticsReport {
            unresolved_navigation,
            dangling_edges,
            isolated_entity_types,
        };

        debug!(
            "Diagnostics: {} unresolved navigation properties, {} dangling edges, {} isolated entity types",
            report.unresolved_navigation.len(),
            report.dangling_edges.len(),
            report.isolated_entity_types.len()
        );

        report
    }

    fn find_unresolved_navigation(&self, schema: &Schema) -> Vec<UnresolvedNavigation> {
        let mut unresolved = Vec::new();

        for entity in &schema.entity_types {
            for navigation in &entity.navigation_properties {
                let reason = match find_association(&navigation.relationship, &schema.associations) {
                    None => Some(UnresolvedReason::UnknownAssociation),
                    Some(association) => {
                        if find_end_type(association, &navigation.from_role).is_none() {
                            Some(UnresolvedReason::UnknownFromRole)
                        } else if find_end_type(association, &navigation.to_role).is_none() {
                            Some(UnresolvedReason::UnknownToRole)
                        } else {
                            None
                        }
                    }
                };

                if let Some(reason) = reason {
                    unresolved.push(UnresolvedNavigation {
                        entity_type: entity.name.clone(),
                        navigation_property: navigation.name.clone(),
                        reason,
                    });
                }
            }
        }

        unresolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Association, AssociationEnd, EntityType, NavigationProperty};

    fn end(role: &str, type_name: &str) -> AssociationEnd {
        AssociationEnd {
            role: role.to_string(),
            type_name: type_name.to_string(),
            multiplicity: None,
        }
    }

    #[test]
    fn reports_each_kind_of_unresolved_navigation() {
        let mut customer = EntityType::new("Customer");
        customer.navigation_properties = vec![
            NavigationProperty::new("Orders", "NS.Customer_Orders", "C", "O"),
            NavigationProperty::new("Ghost", "NS.Nope", "C", "O"),
            NavigationProperty::new("BadFrom", "NS.Customer_Orders", "X", "O"),
            NavigationProperty::new("BadTo", "NS.Customer_Orders", "C", "X"),
        ];
        let schema = Schema {
            namespace: None,
            entity_types: vec![customer, EntityType::new("Order"), EntityType::new("Region")],
            associations: vec![Association {
                name: "Customer_Orders".to_string(),
                ends: vec![end("C", "NS.Customer"), end("O", "NS.Order")],
            }],
        };

        let report = SchemaDiagnostics::new().analyze(&schema);
        let reasons: Vec<_> = report
            .unresolved_navigation
            .iter()
            .map(|u| (u.navigation_property.as_str(), u.reason))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ("Ghost", UnresolvedReason::UnknownAssociation),
                ("BadFrom", UnresolvedReason::UnknownFromRole),
                ("BadTo", UnresolvedReason::UnknownToRole),
            ]
        );
        assert!(report.dangling_edges.is_empty());
        assert_eq!(report.isolated_entity_types, vec!["Region".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn edge_to_undeclared_type_is_dangling() {
        let mut customer = EntityType::new("Customer");
        customer.navigation_properties =
            vec![NavigationProperty::new("Orders", "Customer_Orders", "C", "O")];
        let schema = Schema {
            namespace: None,
            entity_types: vec![customer],
            associations: vec![Association {
                name: "Customer_Orders".to_string(),
                ends: vec![end("C", "NS.Customer"), end("O", "Other.Order")],
            }],
        };

        let report = SchemaDiagnostics::new().analyze(&schema);
        assert!(report.unresolved_navigation.is_empty());
        assert_eq!(
            report.dangling_edges,
            vec![GraphEdge {
                from: "Customer".to_string(),
                to: "Order".to_string(),
            }]
        );
        assert_eq!(report.isolated_entity_types, vec!["Customer".to_string()]);
        assert!(!report.is_clean());
    }
}
