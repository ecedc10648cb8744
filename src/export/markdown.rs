//! Markdown exporter for normalized schemas
//!
//! Renders the list/detail view of a schema as Markdown: an entity-type
//! index followed by one section per entity type with its properties and
//! navigation properties.

use crate::export::{ExportError, ExportResult};
use crate::models::{EntityType, Property, Schema};

/// Markdown exporter for schemas
#[derive(Debug, Default)]
pub struct MarkdownExporter {
    show_extensions: bool,
}

impl MarkdownExporter {
    /// Create a new Markdown exporter instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Include the raw extension list of each property as an extra column.
    pub fn with_extensions(show_extensions: bool) -> Self {
        Self { show_extensions }
    }

    /// Export a schema to Markdown
    ///
    /// # Arguments
    ///
    /// * `schema` - The normalized schema to document
    ///
    /// # Returns
    ///
    /// An `ExportResult` with format `markdown`
    pub fn export(&self, schema: &Schema) -> Result<ExportResult, ExportError> {
        Ok(ExportResult {
            content: self.export_schema(schema),
            format: "markdown".to_string(),
        })
    }

    /// Render a schema to a Markdown string
    pub fn export_schema(&self, schema: &Schema) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "# {}\n\n",
            schema.namespace.as_deref().unwrap_or("Schema")
        ));

        // Entity type index
        md.push_str(&format!("**Entity Types:** {}\n\n", schema.entity_types.len()));
        for entity in &schema.entity_types {
            md.push_str(&format!(
                "- [{}](#{}) ({})\n",
                entity.name,
                anchor(&entity.name),
                entity.key_summary()
            ));
        }
        md.push('\n');

        for entity in &schema.entity_types {
            md.push_str(&self.export_entity_type(entity));
        }

        md
    }

    /// Render the detail section of one entity type
    pub fn export_entity_type(&self, entity: &EntityType) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", entity.name));
        if !entity.key_properties.is_empty() {
            md.push_str(&format!("**Key:** {}\n\n", entity.key_summary()));
        }

        // Properties table
        if !entity.properties.is_empty() {
            md.push_str("### Properties\n\n");
            if self.show_extensions {
                md.push_str("| Name | Type | Label | Key | Creatable | Updatable | Filterable | Sortable | Extensions |\n");
                md.push_str("|------|------|-------|-----|-----------|-----------|------------|----------|------------|\n");
            } else {
                md.push_str("| Name | Type | Label | Key | Creatable | Updatable | Filterable | Sortable |\n");
                md.push_str("|------|------|-------|-----|-----------|-----------|------------|----------|\n");
            }
            for property in &entity.properties {
                md.push_str(&self.property_row(entity, property));
            }
            md.push('\n');
        }

        // Navigation properties table
        if !entity.navigation_properties.is_empty() {
            md.push_str("### Navigation Properties\n\n");
            md.push_str("| Name | Relationship | From Role | To Role | Target |\n");
            md.push_str("|------|--------------|-----------|---------|--------|\n");
            for navigation in &entity.navigation_properties {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    escape_cell(&navigation.name),
                    escape_cell(&navigation.relationship),
                    escape_cell(&navigation.from_role),
                    escape_cell(&navigation.to_role),
                    navigation
                        .to_type
                        .as_deref()
                        .map(escape_cell)
                        .unwrap_or_else(|| "-".to_string())
                ));
            }
            md.push('\n');
        }

        md
    }

    fn property_row(&self, entity: &EntityType, property: &Property) -> String {
        let mut row = format!(
            "| {} | {} | {} | {} | {} | {} | {} | {} |",
            escape_cell(&property.name),
            escape_cell(&property.type_name),
            escape_cell(&property.label),
            check(entity.is_key(&property.name)),
            check(property.creatable),
            check(property.updatable),
            check(property.filterable),
            check(property.sortable),
        );
        if self.show_extensions {
            let extensions = property
                .extensions
                .iter()
                .map(|e| match &e.namespace {
                    Some(ns) => format!("{}:{}={}", ns, e.name, e.value),
                    None => format!("{}={}", e.name, e.value),
                })
                .collect::<Vec<_>>()
                .join(", ");
            row.push_str(&format!(" {} |", escape_cell(&extensions)));
        }
        row.push('\n');
        row
    }
}

fn check(value: bool) -> &'static str {
    if value { "✓" } else { "" }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// GitHub-style heading anchor
fn anchor(heading: &str) -> String {
    heading
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                Some(c.to_ascii_lowercase())
            } else if c == ' ' {
                Some('-')
            } else {
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Extension, NavigationProperty};

    fn customer() -> EntityType {
        let mut entity = EntityType::new("Customer");
        entity.key_properties = vec!["CustomerID".to_string()];
        let mut id = Property::new("CustomerID", "Edm.String");
        id.label = "Customer | ID".to_string();
        id.creatable = false;
        id.extensions = vec![Extension {
            name: "creatable".to_string(),
            value: "false".to_string(),
            namespace: Some("sap".to_string()),
        }];
        entity.properties = vec![id];
        let mut orders = NavigationProperty::new("Orders", "Demo.Customer_Orders", "A", "B");
        orders.to_type = Some("Order".to_string());
        entity.navigation_properties = vec![
            orders,
            NavigationProperty::new("Missing", "Demo.Missing", "A", "C"),
        ];
        entity
    }

    #[test]
    fn renders_property_and_navigation_tables() {
        let md = MarkdownExporter::new().export_entity_type(&customer());
        assert!(md.contains("## Customer"));
        assert!(md.contains("**Key:** CustomerID"));
        assert!(md.contains("| CustomerID | Edm.String | Customer \\| ID | ✓ |  | ✓ | ✓ | ✓ |"));
        assert!(md.contains("| Orders | Demo.Customer_Orders | A | B | Order |"));
        assert!(md.contains("| Missing | Demo.Missing | A | C | - |"));
        assert!(!md.contains("Extensions"));
    }

    #[test]
    fn extensions_column_is_optional() {
        let md = MarkdownExporter::with_extensions(true).export_entity_type(&customer());
        assert!(md.contains("| Extensions |"));
        assert!(md.contains("sap:creatable=false"));
    }

    #[test]
    fn anchors_are_lowercase() {
        assert_eq!(anchor("Order_Details"), "order_details");
        assert_eq!(anchor("Sales By Category"), "sales-by-category");
    }
}
