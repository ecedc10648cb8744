//! CLI command implementations

pub mod export;
pub mod inspect;
pub mod validate;

use crate::cli::error::CliError;
use crate::import::{MetadataFormat, MetadataImporter, NormalizeOptions};
use crate::models::Schema;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

/// Load input content from file or stdin (`-`)
pub fn load_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .map_err(|e| CliError::InvalidArgument(format!("Failed to read stdin: {}", e)))?;
        Ok(content)
    } else {
        let path = PathBuf::from(input);
        if !path.exists() {
            return Err(CliError::FileNotFound(path));
        }
        std::fs::read_to_string(&path).map_err(|e| CliError::FileReadError(path, e.to_string()))
    }
}

/// Read and normalize the schemas of a metadata document.
///
/// The format is detected from the content. Only the first schema entry is
/// returned unless `options.all_schemas` is set.
pub fn load_schemas(input: &str, options: NormalizeOptions) -> Result<Vec<Schema>, CliError> {
    let content = load_input(input)?;
    let format = MetadataFormat::detect(&content);
    let schemas = MetadataImporter::with_options(options).import_selected(&content, format)?;
    info!("Loaded {} schema(s) from {}", schemas.len(), input);
    Ok(schemas)
}
