//! Export command handlers

use crate::cli::commands::load_schemas;
use crate::cli::error::CliError;
use crate::config::DEFAULT_GRAPH_NAME;
use crate::export::{DotExporter, ExportResult, GraphProjector, JsonExporter, MarkdownExporter};
use crate::import::NormalizeOptions;
use crate::models::{Schema, SchemaGraph};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Export format enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Yaml,
    GraphJson,
    GraphYaml,
    Dot,
}

impl ExportFormat {
    /// File extension used when the output is a directory
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Json | ExportFormat::GraphJson => "json",
            ExportFormat::Yaml | ExportFormat::GraphYaml => "yaml",
            ExportFormat::Dot => "dot",
        }
    }
}

/// Arguments for export operations
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub format: ExportFormat,
    /// Input path or `-` for stdin
    pub input: String,
    /// Output file, or an existing directory to write `<graph_name>.<ext>` into
    pub output: PathBuf,
    pub force: bool,
    pub show_extensions: bool,
    pub graph_name: String,
    pub options: NormalizeOptions,
}

impl ExportArgs {
    pub fn new(format: ExportFormat, input: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        Self {
            format,
            input: input.into(),
            output: output.into(),
            force: false,
            show_extensions: false,
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            options: NormalizeOptions::default(),
        }
    }

    /// Resolved output file path
    pub fn output_path(&self) -> PathBuf {
        if self.output.is_dir() {
            self.output
                .join(format!("{}.{}", self.graph_name, self.format.extension()))
        } else {
            self.output.clone()
        }
    }
}

/// Check if file exists and handle overwrite
pub fn check_file_overwrite(output_path: &Path, force: bool) -> Result<(), CliError> {
    if output_path.exists() && !force {
        return Err(CliError::OutputExists(output_path.to_path_buf()));
    }
    Ok(())
}

/// Write export output to file
pub fn write_export_output(output_path: &Path, content: &str) -> Result<(), CliError> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CliError::FileWriteError(
                output_path.to_path_buf(),
                format!("Failed to create directory: {}", e),
            )
        })?;
    }

    std::fs::write(output_path, content)
        .map_err(|e| CliError::FileWriteError(output_path.to_path_buf(), e.to_string()))
}

/// Handle the export command
pub fn handle_export(args: &ExportArgs) -> Result<(), CliError> {
    let output_path = args.output_path();
    check_file_overwrite(&output_path, args.force)?;

    let schemas = load_schemas(&args.input, args.options)?;
    let result = render_export(args, &schemas)?;

    write_export_output(&output_path, &result.content)?;
    println!(
        "✅ Exported {} schema(s) to {} format: {}",
        schemas.len(),
        result.format,
        output_path.display()
    );

    Ok(())
}

/// Render the export content without touching the filesystem
pub fn render_export(args: &ExportArgs, schemas: &[Schema]) -> Result<ExportResult, CliError> {
    let json = JsonExporter::new();
    let result = match args.format {
        ExportFormat::Markdown => {
            let exporter = MarkdownExporter::with_extensions(args.show_extensions);
            let content = schemas
                .iter()
                .map(|schema| exporter.export_schema(schema))
                .collect::<Vec<_>>()
                .join("\n");
            ExportResult {
                content,
                format: "markdown".to_string(),
            }
        }
        ExportFormat::Json => match schemas {
            [schema] => json.export_schema(schema)?,
            _ => json.export_schemas(schemas)?,
        },
        ExportFormat::Yaml => match schemas {
            [schema] => json.export_schema_yaml(schema)?,
            _ => json.export_schemas_yaml(schemas)?,
        },
        ExportFormat::GraphJson => json.export_graph(&project_all(schemas))?,
        ExportFormat::GraphYaml => json.export_graph_yaml(&project_all(schemas))?,
        ExportFormat::Dot => DotExporter::new().export(&project_all(schemas))?,
    };
    Ok(result)
}

/// Project every schema and concatenate the graphs in schema order
fn project_all(schemas: &[Schema]) -> SchemaGraph {
    let projector = GraphProjector::new();
    let mut graph = SchemaGraph::default();
    for schema in schemas {
        let projected = projector.project(schema);
        graph.nodes.extend(projected.nodes);
        graph.edges.extend(projected.edges);
    }
    debug!(
        "Combined graph has {} nodes and {} edges",
        graph.nodes.len(),
        graph.edges.len()
    );
    graph
}
