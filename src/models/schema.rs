//! Normalized schema model
//!
//! The query-ready form of a `$metadata` schema entry: entity types with
//! flattened properties and resolved navigation targets, plus the
//! associations they were joined against.

use crate::import::alias::local_name;
use serde::{Deserialize, Serialize};

/// Normalized schema produced by one normalization pass
///
/// Entity types and associations keep the order of the raw document.
///
/// # Example
///
/// ```rust
/// use odata_explorer_sdk::models::{EntityType, Schema};
///
/// let schema = Schema {
///     namespace: None,
///     entity_types: vec![EntityType::new("Customer"), EntityType::new("Order")],
///     associations: Vec::new(),
/// };
/// assert!(schema.entity_type("Order").is_some());
/// assert_eq!(schema.search_entity_types("Cust").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Schema namespace, when the document declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default)]
    pub entity_types: Vec<EntityType>,
    #[serde(default)]
    pub associations: Vec<Association>,
}

/// A named record type with a primary key, properties and navigation properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityType {
    /// Unqualified type name
    pub name: String,
    /// Key property names; order matters for composite keys
    #[serde(default)]
    pub key_properties: Vec<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub navigation_properties: Vec<NavigationProperty>,
}

/// Scalar property with capability flags flattened from vendor extensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    /// Raw OData type identifier, e.g. `Edm.String`
    #[serde(rename = "type")]
    pub type_name: String,
    /// Display label from the `label` extension, empty when absent
    #[serde(default)]
    pub label: String,
    pub creatable: bool,
    pub updatable: bool,
    pub filterable: bool,
    pub sortable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<String>,
    /// Vendor extensions as declared, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
}

/// Vendor/service extension attached to a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extension {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

/// Typed reference from one entity type to another via an association
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationProperty {
    pub name: String,
    /// Association identifier as written in the document (may be qualified)
    pub relationship: String,
    pub from_role: String,
    pub to_role: String,
    /// Entity type at the `from_role` end, when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_type: Option<String>,
    /// Entity type at the `to_role` end, when resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_type: Option<String>,
}

/// Named relationship between association ends
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    /// Unqualified name, used as the join key
    pub name: String,
    #[serde(default)]
    pub ends: Vec<AssociationEnd>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssociationEnd {
    pub role: String,
    /// Entity type of this end as declared (usually namespace-qualified)
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplicity: Option<String>,
}

impl Property {
    /// Create a property with default label and all capability flags enabled.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            label: String::new(),
            creatable: true,
            updatable: true,
            filterable: true,
            sortable: true,
            nullable: None,
            max_length: None,
            extensions: Vec::new(),
        }
    }
}

impl NavigationProperty {
    pub fn new(
        name: impl Into<String>,
        relationship: impl Into<String>,
        from_role: impl Into<String>,
        to_role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            relationship: relationship.into(),
            from_role: from_role.into(),
            to_role: to_role.into(),
            from_type: None,
            to_type: None,
        }
    }
}

impl EntityType {
    /// Create an entity type with no key, properties or navigation properties.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn navigation_property(&self, name: &str) -> Option<&NavigationProperty> {
        self.navigation_properties.iter().find(|n| n.name == name)
    }

    /// Whether `property_name` is part of the primary key
    pub fn is_key(&self, property_name: &str) -> bool {
        self.key_properties.iter().any(|k| k == property_name)
    }

    /// Key property names joined with `,`
    pub fn key_summary(&self) -> String {
        self.key_properties.join(",")
    }
}

impl Schema {
    /// Look up an entity type by exact name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    /// Entity types whose name contains `query` (case-sensitive), in schema order.
    ///
    /// An empty query matches every entity type.
    pub fn search_entity_types(&self, query: &str) -> Vec<&EntityType> {
        self.entity_types
            .iter()
            .filter(|e| query.is_empty() || e.name.contains(query))
            .collect()
    }

    /// Look up an association by name; qualified names are resolved to their local part.
    pub fn association(&self, name: &str) -> Option<&Association> {
        let local = local_name(name);
        self.associations.iter().find(|a| a.name == local)
    }

    pub fn is_empty(&self) -> bool {
        self.entity_types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Schema {
        let mut customer = EntityType::new("Customer");
        customer.key_properties = vec!["CustomerID".to_string(), "Region".to_string()];
        customer.properties = vec![
            Property::new("CustomerID", "Edm.String"),
            Property::new("Region", "Edm.String"),
        ];
        Schema {
            namespace: Some("Demo".to_string()),
            entity_types: vec![
                customer,
                EntityType::new("CustomerDemographic"),
                EntityType::new("Order"),
            ],
            associations: vec![Association {
                name: "Customer_Orders".to_string(),
                ends: Vec::new(),
            }],
        }
    }

    #[test]
    fn search_is_substring_and_case_sensitive() {
        let schema = sample();
        let names: Vec<&str> = schema
            .search_entity_types("Customer")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Customer", "CustomerDemographic"]);
        assert!(schema.search_entity_types("customer").is_empty());
        assert_eq!(schema.search_entity_types("").len(), 3);
    }

    #[test]
    fn key_helpers() {
        let schema = sample();
        let customer = schema.entity_type("Customer").unwrap();
        assert_eq!(customer.key_summary(), "CustomerID,Region");
        assert!(customer.is_key("Region"));
        assert!(!customer.is_key("Name"));
        assert!(customer.property("Region").is_some());
    }

    #[test]
    fn association_lookup_resolves_alias() {
        let schema = sample();
        assert!(schema.association("Demo.Customer_Orders").is_some());
        assert!(schema.association("Customer_Orders").is_some());
        assert!(schema.association("Other").is_none());
    }

    #[test]
    fn property_defaults() {
        let property = Property::new("Name", "Edm.String");
        assert_eq!(property.label, "");
        assert!(property.creatable && property.updatable && property.filterable && property.sortable);
    }
}
