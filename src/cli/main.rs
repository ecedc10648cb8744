//! CLI binary entry point for odata-explorer

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use odata_explorer_sdk::cli::commands::export::{ExportArgs, ExportFormat, handle_export};
#[cfg(feature = "cli")]
use odata_explorer_sdk::cli::commands::inspect::{
    InspectArgs, handle_inspect, handle_search, handle_show,
};
#[cfg(feature = "cli")]
use odata_explorer_sdk::cli::commands::validate::handle_validate;
#[cfg(feature = "cli")]
use odata_explorer_sdk::cli::error::CliError;
#[cfg(feature = "cli")]
use odata_explorer_sdk::config::ExplorerConfig;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "odata-explorer")]
#[command(about = "Explore the entity types and associations of OData v2 $metadata documents")]
#[command(version)]
struct Cli {
    /// Normalize every schema entry instead of only the first
    #[arg(long, global = true)]
    all_schemas: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: .odata-explorer.toml in the current directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List entity types with their keys and counts
    Inspect {
        /// Input file path or '-' for stdin
        input: String,
    },
    /// Show the detail view of one entity type
    Show {
        /// Input file path or '-' for stdin
        input: String,
        /// Entity type name
        entity_type: String,
        /// Include the raw extension list of each property
        #[arg(long)]
        extensions: bool,
    },
    /// Filter entity types by a case-sensitive name substring
    Search {
        /// Input file path or '-' for stdin
        input: String,
        /// Substring to look for
        query: String,
    },
    /// Export a schema or its graph projection
    Export {
        /// Format to export to
        #[arg(value_enum)]
        format: ExportFormatArg,
        /// Input file path or '-' for stdin
        input: String,
        /// Output file path, or a directory for <graph_name>.<ext>
        output: PathBuf,
        /// Overwrite existing files without prompting
        #[arg(short, long)]
        force: bool,
        /// Include the raw extension list of each property (markdown format)
        #[arg(long)]
        extensions: bool,
    },
    /// Report unresolved navigation properties and dangling edges
    Validate {
        /// Input file path or '-' for stdin
        input: String,
    },
}

#[cfg(feature = "cli")]
#[derive(clap::ValueEnum, Clone, Debug)]
enum ExportFormatArg {
    /// Markdown list/detail documentation
    Markdown,
    /// Normalized schema as JSON
    Json,
    /// Normalized schema as YAML
    Yaml,
    /// Graph projection as JSON
    GraphJson,
    /// Graph projection as YAML
    GraphYaml,
    /// Graph projection as Graphviz DOT
    Dot,
}

#[cfg(feature = "cli")]
fn convert_export_format(format: ExportFormatArg) -> ExportFormat {
    match format {
        ExportFormatArg::Markdown => ExportFormat::Markdown,
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Yaml => ExportFormat::Yaml,
        ExportFormatArg::GraphJson => ExportFormat::GraphJson,
        ExportFormatArg::GraphYaml => ExportFormat::GraphYaml,
        ExportFormatArg::Dot => ExportFormat::Dot,
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&PathBuf>) -> Result<ExplorerConfig, CliError> {
    let config = match path {
        Some(path) => ExplorerConfig::load_from(path)?,
        None => {
            let cwd = std::env::current_dir().map_err(|e| {
                CliError::InvalidArgument(format!("Failed to resolve current directory: {}", e))
            })?;
            ExplorerConfig::load(&cwd)?
        }
    };
    Ok(config)
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_ref())?;
    if cli.all_schemas {
        config.normalize.all_schemas = true;
    }
    let options = config.normalize_options();

    match cli.command {
        Commands::Inspect { input } => handle_inspect(&InspectArgs { input, options }),
        Commands::Show {
            input,
            entity_type,
            extensions,
        } => handle_show(
            &InspectArgs { input, options },
            &entity_type,
            extensions || config.export.show_extensions,
        ),
        Commands::Search { input, query } => handle_search(&InspectArgs { input, options }, &query),
        Commands::Export {
            format,
            input,
            output,
            force,
            extensions,
        } => {
            let args = ExportArgs {
                format: convert_export_format(format),
                input,
                output,
                force,
                show_extensions: extensions || config.export.show_extensions,
                graph_name: config.export.graph_name.clone(),
                options,
            };
            handle_export(&args)
        }
        Commands::Validate { input } => handle_validate(&input, options),
    }
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature is not enabled. Build with --features cli");
    std::process::exit(1);
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn every_subcommand_requires_an_input() {
        for args in [
            vec!["odata-explorer", "inspect"],
            vec!["odata-explorer", "validate"],
            vec!["odata-explorer", "search"],
        ] {
            assert!(Cli::try_parse_from(args).is_err());
        }
    }

    #[test]
    fn validate_accepts_stdin_marker() {
        let cli = Cli::try_parse_from(["odata-explorer", "validate", "-"]).unwrap();
        assert!(matches!(cli.command, Commands::Validate { input } if input == "-"));
    }
}
