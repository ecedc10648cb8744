//! Inspect, show and search command handlers
//!
//! These are the list/detail views of a schema printed to stdout.

use crate::cli::commands::load_schemas;
use crate::cli::error::CliError;
use crate::export::MarkdownExporter;
use crate::import::NormalizeOptions;
use crate::models::{EntityType, Schema};

/// Arguments shared by the read-only commands
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Input path or `-` for stdin
    pub input: String,
    pub options: NormalizeOptions,
}

/// Handle the inspect command: list every entity type
pub fn handle_inspect(args: &InspectArgs) -> Result<(), CliError> {
    let schemas = load_schemas(&args.input, args.options)?;
    for schema in &schemas {
        let entities: Vec<&EntityType> = schema.entity_types.iter().collect();
        print!("{}", render_entity_list(schema, &entities));
    }
    Ok(())
}

/// Handle the show command: detail view of one entity type
pub fn handle_show(args: &InspectArgs, entity_type: &str, show_extensions: bool) -> Result<(), CliError> {
    let schemas = load_schemas(&args.input, args.options)?;
    print!("{}", render_entity_detail(&schemas, entity_type, show_extensions)?);
    Ok(())
}

/// Handle the search command: case-sensitive substring filter on names
pub fn handle_search(args: &InspectArgs, query: &str) -> Result<(), CliError> {
    let schemas = load_schemas(&args.input, args.options)?;
    let mut found = 0;
    for schema in &schemas {
        let matches = schema.search_entity_types(query);
        found += matches.len();
        if !matches.is_empty() {
            print!("{}", render_entity_list(schema, &matches));
        }
    }
    if found == 0 {
        println!("No entity types match '{}'", query);
    }
    Ok(())
}

/// One line per entity type: name, key summary, property and navigation counts
pub fn render_entity_list(schema: &Schema, entities: &[&EntityType]) -> String {
    let mut out = format!(
        "{} ({} entity types)\n",
        schema.namespace.as_deref().unwrap_or("<unnamed schema>"),
        entities.len()
    );
    for entity in entities {
        out.push_str(&format!(
            "  {:<32} key: {:<24} properties: {:<4} navigation: {}\n",
            entity.name,
            entity.key_summary(),
            entity.properties.len(),
            entity.navigation_properties.len()
        ));
    }
    out
}

/// Markdown detail section of the first entity type named `name`
pub fn render_entity_detail(
    schemas: &[Schema],
    name: &str,
    show_extensions: bool,
) -> Result<String, CliError> {
    let entity = schemas
        .iter()
        .find_map(|schema| schema.entity_type(name))
        .ok_or_else(|| CliError::EntityTypeNotFound(name.to_string()))?;
    Ok(MarkdownExporter::with_extensions(show_extensions).export_entity_type(entity))
}
